//! Login audit trail
//!
//! Every login attempt that resolved a social account leaves a
//! SocialLoginSession row. Writing the row is best-effort; the login
//! result never depends on it.

use chrono::Utc;
use tracing::warn;

use quizhub_common::auth::generate_state;
use quizhub_core::entities::SocialLoginSession;

use crate::dto::LoginMeta;

use super::context::ServiceContext;

/// Record a successful login and return the opaque session id
pub(crate) async fn record_success(
    ctx: &ServiceContext,
    social_account_id: i64,
    meta: &LoginMeta,
) -> String {
    let session_id = generate_state();
    let mut session = SocialLoginSession::success(session_id.clone(), social_account_id);
    session.ip.clone_from(&meta.ip);
    session.user_agent.clone_from(&meta.user_agent);
    if let Err(e) = ctx.login_session_repo().create(&session).await {
        warn!(error = %e, "login audit row not written");
    }
    session_id
}

/// Record a failed login attempt.
///
/// Skipped when no social account was resolved before the failure (e.g.
/// a bad signature); the audit row is keyed by the account.
pub(crate) async fn record_failure(
    ctx: &ServiceContext,
    social_account_id: Option<i64>,
    meta: &LoginMeta,
    error: &str,
) {
    let Some(social_account_id) = social_account_id else {
        return;
    };
    let session = SocialLoginSession {
        id: 0,
        session_id: generate_state(),
        social_account_id,
        ip: meta.ip.clone(),
        user_agent: meta.user_agent.clone(),
        is_successful: false,
        error_message: Some(error.to_string()),
        created_at: Utc::now(),
    };
    if let Err(e) = ctx.login_session_repo().create(&session).await {
        warn!(error = %e, "login failure audit row not written");
    }
}
