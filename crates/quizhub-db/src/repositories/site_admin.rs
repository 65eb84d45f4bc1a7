//! PostgreSQL implementation of SiteAdminRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::SiteAdmin;
use quizhub_core::traits::{RepoResult, SiteAdminRepository};

use crate::models::SiteAdminModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SiteAdminRepository
#[derive(Clone)]
pub struct PgSiteAdminRepository {
    pool: PgPool,
}

impl PgSiteAdminRepository {
    /// Create a new PgSiteAdminRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteAdminRepository for PgSiteAdminRepository {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<SiteAdmin>> {
        let result = sqlx::query_as::<_, SiteAdminModel>(
            r"
            SELECT id, username, email, first_name, last_name, is_superuser,
                   created_at, updated_at
            FROM site_admins
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SiteAdmin::from))
    }

    #[instrument(skip(self, admin), fields(username = %admin.username))]
    async fn upsert(&self, admin: &SiteAdmin) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO site_admins (username, email, first_name, last_name, is_superuser, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            ON CONFLICT (username) DO UPDATE
            SET email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                is_superuser = EXCLUDED.is_superuser,
                updated_at = NOW()
            ",
        )
        .bind(&admin.username)
        .bind(&admin.email)
        .bind(&admin.first_name)
        .bind(&admin.last_name)
        .bind(admin.is_superuser)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_username(&self, username: &str) -> RepoResult<()> {
        sqlx::query("DELETE FROM site_admins WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
