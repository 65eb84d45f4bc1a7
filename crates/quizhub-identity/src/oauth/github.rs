//! GitHub OAuth client

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use quizhub_common::config::OAuthProviderConfig;
use quizhub_core::value_objects::Provider;

use super::profile::{split_name, OAuthToken, ProviderProfile};
use super::OAuthClient;
use crate::services::{ServiceError, ServiceResult};

const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";
const EMAILS_URL: &str = "https://api.github.com/user/emails";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = "quizhub";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: i64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// GitHub OAuth client over `reqwest`
pub struct GithubClient {
    http: reqwest::Client,
    config: OAuthProviderConfig,
}

impl GithubClient {
    pub fn new(config: OAuthProviderConfig) -> ServiceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ServiceError::internal(format!("http client: {e}")))?;
        Ok(Self { http, config })
    }

    /// The public profile omits the email for most accounts; the primary
    /// verified address comes from `user/emails`.
    async fn fetch_primary_email(&self, token: &OAuthToken) -> ServiceResult<Option<String>> {
        let emails: Vec<GithubEmail> = self
            .http
            .get(EMAILS_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| ServiceError::provider(Provider::Github, e.to_string()))?
            .error_for_status()
            .map_err(|e| ServiceError::provider(Provider::Github, e.to_string()))?
            .json()
            .await
            .map_err(|e| ServiceError::provider(Provider::Github, e.to_string()))?;

        Ok(emails
            .iter()
            .find(|e| e.primary && e.verified)
            .or_else(|| emails.iter().find(|e| e.verified))
            .map(|e| e.email.clone()))
    }
}

#[async_trait]
impl OAuthClient for GithubClient {
    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> ServiceResult<OAuthToken> {
        let response: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::provider(Provider::Github, e.to_string()))?
            .json()
            .await
            .map_err(|e| ServiceError::provider(Provider::Github, e.to_string()))?;

        match response.access_token {
            Some(access_token) => Ok(OAuthToken::bearer(access_token)),
            None => Err(ServiceError::provider(
                Provider::Github,
                response
                    .error_description
                    .unwrap_or_else(|| "no access token in response".to_string()),
            )),
        }
    }

    #[instrument(skip(self, token))]
    async fn fetch_profile(&self, token: &OAuthToken) -> ServiceResult<ProviderProfile> {
        let user: GithubUser = self
            .http
            .get(USER_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| ServiceError::provider(Provider::Github, e.to_string()))?
            .error_for_status()
            .map_err(|e| ServiceError::provider(Provider::Github, e.to_string()))?
            .json()
            .await
            .map_err(|e| ServiceError::provider(Provider::Github, e.to_string()))?;

        let email = match user.email {
            Some(email) => Some(email),
            None => self.fetch_primary_email(token).await?,
        };
        debug!(login = %user.login, has_email = email.is_some(), "github profile fetched");

        let (first_name, last_name) = user
            .name
            .as_deref()
            .map_or((None, None), split_name);

        let mut profile = ProviderProfile::new(Provider::Github, user.id.to_string());
        profile.username = Some(user.login);
        profile.email = email;
        profile.first_name = first_name;
        profile.last_name = last_name;
        profile.avatar_url = user.avatar_url;
        profile.access_token = Some(token.access_token.clone());
        Ok(profile)
    }
}
