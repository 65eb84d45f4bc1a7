//! # quizhub-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `quizhub-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quizhub_db::pool::{create_pool, DatabaseConfig};
//! use quizhub_db::repositories::PgUserRepository;
//! use quizhub_core::traits::UserRepository;
//!
//! async fn example(app: &quizhub_common::config::AppConfig)
//! -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: app.database.url.clone(),
//!         max_connections: app.database.max_connections,
//!         min_connections: app.database.min_connections,
//!         ..DatabaseConfig::default()
//!     };
//!     let pool = create_pool(&config).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{
    PgAdminRepository, PgChannelRepository, PgChatUserRepository, PgCredentialRepository,
    PgLoginSessionRepository, PgMiniAppUserRepository, PgNotificationRepository,
    PgSiteAdminRepository, PgSocialAccountRepository, PgStatisticsRepository,
    PgSubscriptionRepository, PgUserRepository,
};
