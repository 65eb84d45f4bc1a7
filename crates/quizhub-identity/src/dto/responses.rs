//! Outbound DTOs for the reconcilers

use quizhub_core::entities::{CanonicalUser, SocialAccount};

/// Result of a successful social login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: CanonicalUser,
    pub social_account: SocialAccount,
    pub is_new_user: bool,
    /// Opaque audit-session identifier
    pub session_id: String,
}
