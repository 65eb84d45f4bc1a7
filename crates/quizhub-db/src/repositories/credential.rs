//! PostgreSQL implementation of CredentialRepository

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::Credential;
use quizhub_core::traits::{CredentialRepository, RepoResult};

use crate::models::CredentialModel;

use super::error::{credential_not_found, map_db_error};

const CREDENTIAL_COLUMNS: &str = "id, platform, username, attributes, created_at, updated_at";

/// PostgreSQL implementation of CredentialRepository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    /// Create a new PgCredentialRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for PgCredentialRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Credential>> {
        let result = sqlx::query_as::<_, CredentialModel>(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM credentials WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Credential::from))
    }

    #[instrument(skip(self))]
    async fn find_by_platform(
        &self,
        platform: &str,
        username: &str,
    ) -> RepoResult<Option<Credential>> {
        let result = sqlx::query_as::<_, CredentialModel>(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM credentials WHERE platform = $1 AND username = $2"
        ))
        .bind(platform)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Credential::from))
    }

    #[instrument(skip(self))]
    async fn upsert(&self, platform: &str, username: &str) -> RepoResult<Credential> {
        let result = sqlx::query_as::<_, CredentialModel>(&format!(
            r"
            INSERT INTO credentials (platform, username)
            VALUES ($1, $2)
            ON CONFLICT (platform, username)
            DO UPDATE SET updated_at = NOW()
            RETURNING {CREDENTIAL_COLUMNS}
            "
        ))
        .bind(platform)
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Credential::from(result))
    }

    #[instrument(skip(self))]
    async fn get_attribute(&self, credential_id: i64, key: &str) -> RepoResult<Option<Value>> {
        let result = sqlx::query_scalar::<_, Option<Value>>(
            "SELECT attributes -> $2 FROM credentials WHERE id = $1",
        )
        .bind(credential_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(value) => Ok(value),
            None => Err(credential_not_found(credential_id)),
        }
    }

    #[instrument(skip(self, value))]
    async fn set_attribute(&self, credential_id: i64, key: &str, value: Value) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE credentials
            SET attributes = jsonb_set(COALESCE(attributes, '{}'::jsonb), ARRAY[$2], $3, true),
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(credential_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(credential_not_found(credential_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_attribute(&self, credential_id: i64, key: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE credentials
            SET attributes = COALESCE(attributes, '{}'::jsonb) - $2,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(credential_id)
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(credential_not_found(credential_id));
        }

        Ok(())
    }
}
