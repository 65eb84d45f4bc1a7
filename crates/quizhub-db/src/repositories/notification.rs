//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::Notification;
use quizhub_core::traits::{NotificationRepository, RepoResult};
use quizhub_core::value_objects::TelegramId;

use super::error::map_db_error;

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification))]
    async fn create(&self, notification: &Notification) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO notifications (recipient_telegram_id, body_html, delivered_at, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id
            ",
        )
        .bind(notification.recipient.map(TelegramId::into_inner))
        .bind(&notification.body_html)
        .bind(notification.delivered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn mark_delivered(&self, id: i64) -> RepoResult<()> {
        sqlx::query("UPDATE notifications SET delivered_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
