//! Application configuration structs
//!
//! Loads configuration from environment variables. Environment parsing lives
//! only here, at the program edge; components receive typed sub-configs.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub telegram: TelegramConfig,
    pub github: Option<OAuthProviderConfig>,
    pub google: Option<OAuthProviderConfig>,
    pub browser: BrowserConfig,
    pub instagram: InstagramConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Public base URL of the site, used in notification links
    #[serde(default)]
    pub public_url: Option<String>,
}

/// OAuth application credentials for one provider
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Browser automation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Local chromedriver endpoint
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    /// Remote WebDriver endpoint for the undetected back-end
    #[serde(default)]
    pub remote_webdriver_url: Option<String>,
    #[serde(default = "default_true")]
    pub headless: bool,
    /// `BROWSER_DEBUG` - force a visible browser
    #[serde(default)]
    pub debug: bool,
    /// `USE_MANUAL_UPLOAD` - enable the human-upload prompt tier
    #[serde(default)]
    pub manual_upload: bool,
    /// `USE_UNDETECTED_CHROMEDRIVER` - switch to the remote back-end
    #[serde(default)]
    pub undetected: bool,
    /// Whether the process can open a visible browser at all
    #[serde(default = "default_true")]
    pub interactive: bool,
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_secs: u64,
    #[serde(default)]
    pub mobile_user_agent: bool,
}

/// Instagram publishing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InstagramConfig {
    /// Credential record name holding the persisted browser session
    pub username: String,
    /// Long-lived Graph API token, enables the API fallback
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub business_account_id: Option<String>,
    /// `UPDATE_INSTAGRAM_SESSION` - one-time interactive session bootstrap
    #[serde(default)]
    pub update_session: bool,
}

impl InstagramConfig {
    /// Whether the Graph API fallback is configured
    #[must_use]
    pub fn graph_api_configured(&self) -> bool {
        self.access_token.is_some() && self.business_account_id.is_some()
    }
}

// Default value functions
fn default_app_name() -> String {
    "quizhub".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_wait_timeout() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn env_bool(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn oauth_from_env(prefix: &str) -> Result<Option<OAuthProviderConfig>, ConfigError> {
    let client_id = env::var(format!("{prefix}_CLIENT_ID")).ok();
    let client_secret = env::var(format!("{prefix}_CLIENT_SECRET")).ok();
    match (client_id, client_secret) {
        (Some(client_id), Some(client_secret)) => {
            let redirect_uri = env::var(format!("{prefix}_REDIRECT_URI"))
                .map_err(|_| ConfigError::MissingVar("OAUTH_REDIRECT_URI"))?;
            Ok(Some(OAuthProviderConfig {
                client_id,
                client_secret,
                redirect_uri,
            }))
        }
        (None, None) => Ok(None),
        _ => Err(ConfigError::InvalidValue(
            "OAUTH",
            format!("{prefix}_CLIENT_ID and {prefix}_CLIENT_SECRET must be set together"),
        )),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            telegram: TelegramConfig {
                bot_token: env::var("TELEGRAM_BOT_TOKEN")
                    .map_err(|_| ConfigError::MissingVar("TELEGRAM_BOT_TOKEN"))?,
                public_url: env::var("PUBLIC_URL").ok(),
            },
            github: oauth_from_env("GITHUB")?,
            google: oauth_from_env("GOOGLE")?,
            browser: BrowserConfig {
                webdriver_url: env::var("WEBDRIVER_URL")
                    .unwrap_or_else(|_| default_webdriver_url()),
                remote_webdriver_url: env::var("REMOTE_WEBDRIVER_URL").ok(),
                headless: env::var("BROWSER_HEADLESS")
                    .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                    .unwrap_or(true),
                debug: env_bool("BROWSER_DEBUG"),
                manual_upload: env_bool("USE_MANUAL_UPLOAD"),
                undetected: env_bool("USE_UNDETECTED_CHROMEDRIVER"),
                interactive: env::var("CONTAINER_ONLY")
                    .map(|v| !matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                    .unwrap_or(true),
                wait_timeout_secs: env::var("BROWSER_WAIT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_wait_timeout),
                mobile_user_agent: env_bool("BROWSER_MOBILE_UA"),
            },
            instagram: InstagramConfig {
                username: env::var("INSTAGRAM_USERNAME").unwrap_or_default(),
                access_token: env::var("INSTAGRAM_ACCESS_TOKEN").ok(),
                business_account_id: env::var("INSTAGRAM_BUSINESS_ACCOUNT_ID").ok(),
                update_session: env_bool("UPDATE_INSTAGRAM_SESSION"),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
