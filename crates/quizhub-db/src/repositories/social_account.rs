//! PostgreSQL implementation of SocialAccountRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::SocialAccount;
use quizhub_core::error::DomainError;
use quizhub_core::traits::{RepoResult, SocialAccountRepository};
use quizhub_core::value_objects::Provider;

use crate::mappers::social_account_from_model;
use crate::models::SocialAccountModel;

use super::error::{map_db_error, map_unique_violation};

const ACCOUNT_COLUMNS: &str = r"
    id, user_id, provider, provider_user_id, username, email, first_name, last_name,
    avatar_url, access_token, refresh_token, token_expires_at, is_active,
    last_login_at, created_at, updated_at
";

/// PostgreSQL implementation of SocialAccountRepository
#[derive(Clone)]
pub struct PgSocialAccountRepository {
    pool: PgPool,
}

impl PgSocialAccountRepository {
    /// Create a new PgSocialAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialAccountRepository for PgSocialAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_provider_user(
        &self,
        provider: Provider,
        provider_user_id: &str,
    ) -> RepoResult<Option<SocialAccount>> {
        let result = sqlx::query_as::<_, SocialAccountModel>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM social_accounts WHERE provider = $1 AND provider_user_id = $2"
        ))
        .bind(provider.as_str())
        .bind(provider_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(social_account_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn find_for_user(
        &self,
        user_id: i64,
        provider: Provider,
    ) -> RepoResult<Option<SocialAccount>> {
        let result = sqlx::query_as::<_, SocialAccountModel>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM social_accounts WHERE user_id = $1 AND provider = $2"
        ))
        .bind(user_id)
        .bind(provider.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(social_account_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: i64) -> RepoResult<Vec<SocialAccount>> {
        let rows = sqlx::query_as::<_, SocialAccountModel>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM social_accounts WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(social_account_from_model).collect()
    }

    #[instrument(skip(self, account), fields(provider = %account.provider, user_id = account.user_id))]
    async fn create(&self, account: &SocialAccount) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO social_accounts (
                user_id, provider, provider_user_id, username, email, first_name,
                last_name, avatar_url, access_token, refresh_token, token_expires_at,
                is_active, last_login_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW())
            RETURNING id
            ",
        )
        .bind(account.user_id)
        .bind(account.provider.as_str())
        .bind(&account.provider_user_id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.avatar_url)
        .bind(&account.access_token)
        .bind(&account.refresh_token)
        .bind(account.token_expires_at)
        .bind(account.is_active)
        .bind(account.last_login_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::DuplicateSocialAccount {
                provider: account.provider,
            })
        })?;

        Ok(id)
    }

    #[instrument(skip(self, account), fields(id = account.id))]
    async fn update(&self, account: &SocialAccount) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE social_accounts
            SET username = $2, email = $3, first_name = $4, last_name = $5,
                avatar_url = $6, access_token = $7, refresh_token = $8,
                token_expires_at = $9, is_active = $10, last_login_at = $11,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.avatar_url)
        .bind(&account.access_token)
        .bind(&account.refresh_token)
        .bind(account.token_expires_at)
        .bind(account.is_active)
        .bind(account.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SocialAccountNotFound {
                provider: account.provider,
                provider_user_id: account.provider_user_id.clone(),
            });
        }

        Ok(())
    }
}
