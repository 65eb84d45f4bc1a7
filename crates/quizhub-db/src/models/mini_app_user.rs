//! Mini-App user database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the mini_app_users table.
///
/// `language_tags` is aggregated from the mini_app_user_languages join
/// table by the repository query.
#[derive(Debug, Clone, FromRow)]
pub struct MiniAppUserModel {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub grade: Option<i16>,
    pub language_tags: Vec<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_private: bool,
    pub notifications_enabled: bool,
    pub avatar_1: Option<String>,
    pub avatar_2: Option<String>,
    pub avatar_3: Option<String>,
    pub telegram_link: Option<String>,
    pub github_link: Option<String>,
    pub instagram_link: Option<String>,
    pub facebook_link: Option<String>,
    pub linkedin_link: Option<String>,
    pub youtube_link: Option<String>,
    pub website: Option<String>,
    pub chat_user_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub site_admin_id: Option<i64>,
    pub site_user_id: Option<i64>,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
