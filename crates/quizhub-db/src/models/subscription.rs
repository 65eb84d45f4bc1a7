//! Channel subscription database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the channel_subscriptions table
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub state: String,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub banned_at: Option<DateTime<Utc>>,
    pub banned_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
