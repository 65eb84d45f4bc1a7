//! Social login session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the social_login_sessions audit table
#[derive(Debug, Clone, FromRow)]
pub struct LoginSessionModel {
    pub id: i64,
    pub session_id: String,
    pub social_account_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub is_successful: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}
