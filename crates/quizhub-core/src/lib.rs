//! # quizhub-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, Telegram API, browser, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    BrowserSession, CanonicalUser, ChannelSubscription, Credential, MiniAppUser, Notification,
    SessionCookie, SiteAdmin, SocialAccount, SocialLinks, SocialLoginSession, TaskStatistic,
    TelegramAdmin, TelegramChannel, TelegramChatUser, SESSION_TTL_DAYS,
};
pub use error::DomainError;
pub use traits::{
    AdminRepository, ChannelRepository, ChatUserRepository, CredentialRepository,
    LoginSessionRepository, MiniAppUserRepository, NotificationRepository, RepoResult,
    SiteAdminRepository, SocialAccountRepository, StatisticsRepository, SubscriptionRepository,
    UserRepository,
};
pub use value_objects::{merge_field, BrowserKind, Provider, SubscriptionState, TelegramId};
