//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::TelegramChannel;
use quizhub_core::traits::{ChannelRepository, RepoResult};

use crate::models::TelegramChannelModel;

use super::error::map_db_error;

const CHANNEL_COLUMNS: &str = "id, group_id, title, username, created_at, updated_at";

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<TelegramChannel>> {
        let result = sqlx::query_as::<_, TelegramChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TelegramChannel::from))
    }

    #[instrument(skip(self))]
    async fn find_by_group_id(&self, group_id: i64) -> RepoResult<Option<TelegramChannel>> {
        let result = sqlx::query_as::<_, TelegramChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE group_id = $1"
        ))
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TelegramChannel::from))
    }

    #[instrument(skip(self, channel), fields(group_id = channel.group_id))]
    async fn upsert(&self, channel: &TelegramChannel) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO channels (group_id, title, username, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (group_id) DO UPDATE
            SET title = EXCLUDED.title,
                username = EXCLUDED.username,
                updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(channel.group_id)
        .bind(&channel.title)
        .bind(&channel.username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<TelegramChannel>> {
        let rows = sqlx::query_as::<_, TelegramChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(TelegramChannel::from).collect())
    }
}
