//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! quizhub-core. Each repository handles database operations for a
//! specific domain entity.

mod admin;
mod channel;
mod chat_user;
mod credential;
mod error;
mod login_session;
mod mini_app_user;
mod notification;
mod site_admin;
mod social_account;
mod statistics;
mod subscription;
mod user;

pub use admin::PgAdminRepository;
pub use channel::PgChannelRepository;
pub use chat_user::PgChatUserRepository;
pub use credential::PgCredentialRepository;
pub use login_session::PgLoginSessionRepository;
pub use mini_app_user::PgMiniAppUserRepository;
pub use notification::PgNotificationRepository;
pub use site_admin::PgSiteAdminRepository;
pub use social_account::PgSocialAccountRepository;
pub use statistics::PgStatisticsRepository;
pub use subscription::PgSubscriptionRepository;
pub use user::PgUserRepository;
