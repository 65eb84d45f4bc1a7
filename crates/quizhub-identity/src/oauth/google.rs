//! Google OAuth client

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use quizhub_common::config::OAuthProviderConfig;
use quizhub_core::value_objects::Provider;

use super::profile::{OAuthToken, ProviderProfile};
use super::OAuthClient;
use crate::services::{ServiceError, ServiceResult};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

/// Google OAuth client over `reqwest`
pub struct GoogleClient {
    http: reqwest::Client,
    config: OAuthProviderConfig,
}

impl GoogleClient {
    pub fn new(config: OAuthProviderConfig) -> ServiceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::internal(format!("http client: {e}")))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl OAuthClient for GoogleClient {
    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> ServiceResult<OAuthToken> {
        let response: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::provider(Provider::Google, e.to_string()))?
            .json()
            .await
            .map_err(|e| ServiceError::provider(Provider::Google, e.to_string()))?;

        match response.access_token {
            Some(access_token) => {
                let mut token =
                    OAuthToken::bearer(access_token).with_expires_in(response.expires_in);
                token.refresh_token = response.refresh_token;
                Ok(token)
            }
            None => Err(ServiceError::provider(
                Provider::Google,
                response
                    .error_description
                    .unwrap_or_else(|| "no access token in response".to_string()),
            )),
        }
    }

    #[instrument(skip(self, token))]
    async fn fetch_profile(&self, token: &OAuthToken) -> ServiceResult<ProviderProfile> {
        let user: GoogleUser = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| ServiceError::provider(Provider::Google, e.to_string()))?
            .error_for_status()
            .map_err(|e| ServiceError::provider(Provider::Google, e.to_string()))?
            .json()
            .await
            .map_err(|e| ServiceError::provider(Provider::Google, e.to_string()))?;

        let mut profile = ProviderProfile::new(Provider::Google, user.id);
        profile.email = user.email;
        profile.first_name = user.given_name;
        profile.last_name = user.family_name;
        profile.avatar_url = user.picture;
        profile.access_token = Some(token.access_token.clone());
        profile.refresh_token = token.refresh_token.clone();
        profile.token_expires_at = token.expires_at;
        Ok(profile)
    }
}
