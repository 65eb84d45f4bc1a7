//! Canonical user database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub telegram_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub avatar_url: Option<String>,
    pub telegram_link: Option<String>,
    pub github_link: Option<String>,
    pub instagram_link: Option<String>,
    pub facebook_link: Option<String>,
    pub linkedin_link: Option<String>,
    pub youtube_link: Option<String>,
    pub website: Option<String>,
    pub language: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_telegram_user: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
