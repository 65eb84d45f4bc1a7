//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::ChannelSubscription;
use quizhub_core::error::DomainError;
use quizhub_core::traits::{RepoResult, SubscriptionRepository};

use crate::mappers::subscription_from_model;
use crate::models::SubscriptionModel;

use super::error::map_db_error;

const SUBSCRIPTION_COLUMNS: &str = r"
    id, user_id, channel_id, state, subscribed_at, unsubscribed_at, banned_at,
    banned_until, created_at, updated_at
";

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: i64,
        channel_id: i64,
    ) -> RepoResult<Option<ChannelSubscription>> {
        let result = sqlx::query_as::<_, SubscriptionModel>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM channel_subscriptions WHERE user_id = $1 AND channel_id = $2"
        ))
        .bind(user_id)
        .bind(channel_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(subscription_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ChannelSubscription>> {
        let result = sqlx::query_as::<_, SubscriptionModel>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM channel_subscriptions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(subscription_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: i64) -> RepoResult<Vec<ChannelSubscription>> {
        let rows = sqlx::query_as::<_, SubscriptionModel>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM channel_subscriptions WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(subscription_from_model).collect()
    }

    #[instrument(skip(self, subscription), fields(user_id = subscription.user_id, channel_id = subscription.channel_id))]
    async fn create(&self, subscription: &ChannelSubscription) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO channel_subscriptions (
                user_id, channel_id, state, subscribed_at, unsubscribed_at,
                banned_at, banned_until, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING id
            ",
        )
        .bind(subscription.user_id)
        .bind(subscription.channel_id)
        .bind(subscription.state.as_str())
        .bind(subscription.subscribed_at)
        .bind(subscription.unsubscribed_at)
        .bind(subscription.banned_at)
        .bind(subscription.banned_until)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }

    #[instrument(skip(self, subscription), fields(id = subscription.id))]
    async fn update(&self, subscription: &ChannelSubscription) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_subscriptions
            SET state = $2, subscribed_at = $3, unsubscribed_at = $4, banned_at = $5,
                banned_until = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(subscription.id)
        .bind(subscription.state.as_str())
        .bind(subscription.subscribed_at)
        .bind(subscription.unsubscribed_at)
        .bind(subscription.banned_at)
        .bind(subscription.banned_until)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SubscriptionNotFound {
                user_id: subscription.user_id,
                channel_id: subscription.channel_id,
            });
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        sqlx::query("DELETE FROM channel_subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
