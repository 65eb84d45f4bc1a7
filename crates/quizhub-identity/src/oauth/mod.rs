//! OAuth provider clients
//!
//! [`OAuthClient`] is the seam the login services drive; [`GithubClient`]
//! and [`GoogleClient`] implement it over `reqwest`. Tests substitute
//! scripted doubles.

pub mod github;
pub mod google;
pub mod profile;

pub use github::GithubClient;
pub use google::GoogleClient;
pub use profile::{OAuthToken, ProviderProfile};

use async_trait::async_trait;

use crate::services::ServiceResult;

/// HTTP seam for one OAuth provider
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// Exchange an authorization code for an access token
    async fn exchange_code(&self, code: &str) -> ServiceResult<OAuthToken>;

    /// Fetch the user profile the access token belongs to
    async fn fetch_profile(&self, token: &OAuthToken) -> ServiceResult<ProviderProfile>;
}
