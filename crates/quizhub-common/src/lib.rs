//! # quizhub-common
//!
//! Shared utilities: configuration, application errors, telemetry setup, and
//! the auth primitives (Telegram widget signature, OAuth state tokens).

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use error::{AppError, AppResult};
