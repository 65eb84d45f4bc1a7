//! PostgreSQL implementation of AdminRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::{TelegramAdmin, TelegramChannel};
use quizhub_core::traits::{AdminRepository, RepoResult};
use quizhub_core::value_objects::TelegramId;

use crate::models::{TelegramAdminModel, TelegramChannelModel};

use super::error::map_db_error;

const ADMIN_COLUMNS: &str = r"
    id, telegram_id, username, is_active, photo_url, created_at, updated_at
";

/// PostgreSQL implementation of AdminRepository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    /// Create a new PgAdminRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    #[instrument(skip(self))]
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<TelegramAdmin>> {
        let result = sqlx::query_as::<_, TelegramAdminModel>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM telegram_admins WHERE telegram_id = $1"
        ))
        .bind(telegram_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TelegramAdmin::from))
    }

    #[instrument(skip(self, admin), fields(telegram_id = %admin.telegram_id))]
    async fn upsert(&self, admin: &TelegramAdmin) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO telegram_admins (telegram_id, username, is_active, photo_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (telegram_id) DO UPDATE
            SET username = EXCLUDED.username,
                is_active = EXCLUDED.is_active,
                photo_url = COALESCE(EXCLUDED.photo_url, telegram_admins.photo_url),
                updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(admin.telegram_id.into_inner())
        .bind(&admin.username)
        .bind(admin.is_active)
        .bind(&admin.photo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        // admin_channels rows cascade
        sqlx::query("DELETE FROM telegram_admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn channels_for(&self, admin_id: i64) -> RepoResult<Vec<TelegramChannel>> {
        let rows = sqlx::query_as::<_, TelegramChannelModel>(
            r"
            SELECT c.id, c.group_id, c.title, c.username, c.created_at, c.updated_at
            FROM channels c
            JOIN admin_channels ac ON ac.channel_id = c.id
            WHERE ac.admin_id = $1
            ORDER BY c.id
            ",
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(TelegramChannel::from).collect())
    }

    #[instrument(skip(self))]
    async fn add_channel(&self, admin_id: i64, channel_id: i64) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO admin_channels (admin_id, channel_id)
            VALUES ($1, $2)
            ON CONFLICT (admin_id, channel_id) DO NOTHING
            ",
        )
        .bind(admin_id)
        .bind(channel_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_channel(&self, admin_id: i64, channel_id: i64) -> RepoResult<()> {
        sqlx::query("DELETE FROM admin_channels WHERE admin_id = $1 AND channel_id = $2")
            .bind(admin_id)
            .bind(channel_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_admin_of(&self, admin_id: i64, channel_id: i64) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admin_channels WHERE admin_id = $1 AND channel_id = $2)",
        )
        .bind(admin_id)
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
