//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BrowserConfig, ConfigError, DatabaseConfig, Environment,
    InstagramConfig, OAuthProviderConfig, TelegramConfig,
};
