//! Normalized provider payloads

use chrono::{DateTime, Duration, Utc};

use quizhub_common::auth::WidgetPayload;
use quizhub_core::value_objects::Provider;

/// Access token returned by a code exchange
#[derive(Debug, Clone)]
pub struct OAuthToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl OAuthToken {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Derive the expiry instant from a provider `expires_in` value
    #[must_use]
    pub fn with_expires_in(mut self, expires_in: Option<i64>) -> Self {
        self.expires_at = expires_in.map(|secs| Utc::now() + Duration::seconds(secs));
        self
    }
}

/// Provider-agnostic view of an authenticated external identity.
///
/// Every reconciler normalizes its payload into this shape before touching
/// the identity graph.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub provider: Provider,
    pub provider_user_id: String,
    /// Provider-side handle (`login` for GitHub, `username` for Telegram)
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
}

impl ProviderProfile {
    pub fn new(provider: Provider, provider_user_id: impl Into<String>) -> Self {
        Self {
            provider,
            provider_user_id: provider_user_id.into(),
            username: None,
            email: None,
            first_name: None,
            last_name: None,
            avatar_url: None,
            access_token: None,
            refresh_token: None,
            token_expires_at: None,
        }
    }

    /// Normalize a verified Telegram widget payload
    #[must_use]
    pub fn from_widget(payload: &WidgetPayload) -> Self {
        Self {
            provider: Provider::Telegram,
            provider_user_id: payload.id.to_string(),
            username: payload.username.clone(),
            email: None,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            avatar_url: payload.photo_url.clone(),
            access_token: None,
            refresh_token: None,
            token_expires_at: None,
        }
    }
}

/// Split a provider display name into first/last at the first whitespace
#[must_use]
pub fn split_name(full: &str) -> (Option<String>, Option<String>) {
    let full = full.trim();
    if full.is_empty() {
        return (None, None);
    }
    match full.split_once(char::is_whitespace) {
        Some((first, rest)) => (Some(first.to_string()), Some(rest.trim().to_string())),
        None => (Some(full.to_string()), None),
    }
}
