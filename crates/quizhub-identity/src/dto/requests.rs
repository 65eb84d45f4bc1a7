//! Inbound DTOs for the reconcilers

use serde::Deserialize;
use validator::Validate;

/// OAuth callback parameters plus the state the caller issued earlier.
///
/// The `state` check is mandatory; a missing or mismatched value fails the
/// login before any provider traffic happens.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OAuthCallbackRequest {
    #[validate(length(min = 1, message = "Authorization code is required"))]
    pub code: String,

    #[validate(length(min = 1, message = "State parameter is required"))]
    pub state: String,

    /// State previously stored for this login attempt
    #[validate(length(min = 1, message = "Expected state is required"))]
    pub expected_state: String,
}

/// Request metadata recorded in the login audit trail
#[derive(Debug, Clone, Default)]
pub struct LoginMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
