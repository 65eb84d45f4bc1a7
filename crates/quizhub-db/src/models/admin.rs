//! Telegram admin database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the telegram_admins table.
///
/// The admin-channel relation lives in admin_channels (admin_id, channel_id).
#[derive(Debug, Clone, FromRow)]
pub struct TelegramAdminModel {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub is_active: bool,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
