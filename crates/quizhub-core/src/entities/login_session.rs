//! Social login session entity - audit record of one login attempt

use chrono::{DateTime, Utc};

/// Audit row written for every social login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLoginSession {
    pub id: i64,
    /// Opaque identifier returned to the caller
    pub session_id: String,
    pub social_account_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub is_successful: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SocialLoginSession {
    pub fn success(session_id: String, social_account_id: i64) -> Self {
        Self {
            id: 0,
            session_id,
            social_account_id,
            ip: None,
            user_agent: None,
            is_successful: true,
            error_message: None,
            created_at: Utc::now(),
        }
    }
}
