//! Telegram chat user database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the chat_users table
#[derive(Debug, Clone, FromRow)]
pub struct ChatUserModel {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub is_premium: bool,
    pub site_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
