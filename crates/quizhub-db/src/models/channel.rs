//! Telegram channel database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the channels table
#[derive(Debug, Clone, FromRow)]
pub struct TelegramChannelModel {
    pub id: i64,
    pub group_id: i64,
    pub title: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
