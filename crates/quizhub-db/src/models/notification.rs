//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub recipient_telegram_id: Option<i64>,
    pub body_html: String,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
