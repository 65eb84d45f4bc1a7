//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the PostgreSQL implementation. Services depend only on these
//! traits, which also makes the identity and control-plane logic testable
//! against in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::entities::{
    CanonicalUser, ChannelSubscription, Credential, MiniAppUser, Notification, SiteAdmin,
    SocialAccount, SocialLoginSession, TaskStatistic, TelegramAdmin, TelegramChannel,
    TelegramChatUser,
};
use crate::error::DomainError;
use crate::value_objects::{Provider, TelegramId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Canonical User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by internal id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CanonicalUser>>;

    /// Find user by telegram id
    async fn find_by_telegram_id(&self, telegram_id: TelegramId)
        -> RepoResult<Option<CanonicalUser>>;

    /// Find user by exact email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<CanonicalUser>>;

    /// Find user whose email is asserted by a social account, provided the
    /// user has no Telegram social account yet
    async fn find_by_social_email(&self, email: &str) -> RepoResult<Option<CanonicalUser>>;

    /// Find user by case-insensitive username
    async fn find_by_username_ci(&self, username: &str) -> RepoResult<Option<CanonicalUser>>;

    /// Check if a username is already taken (case-insensitive)
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user; returns the assigned id
    async fn create(&self, user: &CanonicalUser) -> RepoResult<i64>;

    /// Update an existing user
    async fn update(&self, user: &CanonicalUser) -> RepoResult<()>;
}

// ============================================================================
// Social Account Repository
// ============================================================================

#[async_trait]
pub trait SocialAccountRepository: Send + Sync {
    /// Find by the unique `(provider, provider_user_id)` pair
    async fn find_by_provider_user(
        &self,
        provider: Provider,
        provider_user_id: &str,
    ) -> RepoResult<Option<SocialAccount>>;

    /// Find a user's account for one provider
    async fn find_for_user(
        &self,
        user_id: i64,
        provider: Provider,
    ) -> RepoResult<Option<SocialAccount>>;

    /// All accounts attached to a user
    async fn list_for_user(&self, user_id: i64) -> RepoResult<Vec<SocialAccount>>;

    /// Create a new account; returns the assigned id
    async fn create(&self, account: &SocialAccount) -> RepoResult<i64>;

    /// Update an existing account
    async fn update(&self, account: &SocialAccount) -> RepoResult<()>;
}

// ============================================================================
// Telegram Chat User Repository
// ============================================================================

#[async_trait]
pub trait ChatUserRepository: Send + Sync {
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<TelegramChatUser>>;

    /// Insert or update by telegram id; returns the row id
    async fn upsert(&self, user: &TelegramChatUser) -> RepoResult<i64>;

    async fn update(&self, user: &TelegramChatUser) -> RepoResult<()>;
}

// ============================================================================
// Telegram Admin Repository
// ============================================================================

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<TelegramAdmin>>;

    /// Insert or update by telegram id; returns the row id
    async fn upsert(&self, admin: &TelegramAdmin) -> RepoResult<i64>;

    /// Delete the admin row (relations cascade)
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Channels this admin is related to locally
    async fn channels_for(&self, admin_id: i64) -> RepoResult<Vec<TelegramChannel>>;

    /// Add the admin-channel relation (idempotent)
    async fn add_channel(&self, admin_id: i64, channel_id: i64) -> RepoResult<()>;

    /// Remove the admin-channel relation
    async fn remove_channel(&self, admin_id: i64, channel_id: i64) -> RepoResult<()>;

    /// Whether the local relation exists
    async fn is_admin_of(&self, admin_id: i64, channel_id: i64) -> RepoResult<bool>;
}

// ============================================================================
// Site Admin Repository
// ============================================================================

#[async_trait]
pub trait SiteAdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<SiteAdmin>>;

    /// Insert or update by username
    async fn upsert(&self, admin: &SiteAdmin) -> RepoResult<()>;

    async fn delete_by_username(&self, username: &str) -> RepoResult<()>;
}

// ============================================================================
// Mini-App User Repository
// ============================================================================

#[async_trait]
pub trait MiniAppUserRepository: Send + Sync {
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<MiniAppUser>>;

    async fn find_by_site_user(&self, site_user_id: i64) -> RepoResult<Option<MiniAppUser>>;

    async fn update(&self, user: &MiniAppUser) -> RepoResult<()>;
}

// ============================================================================
// Task Statistics Repository
// ============================================================================

#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Statistics rows belonging to a Mini-App user with no canonical link yet
    async fn unlinked_for_mini_app(
        &self,
        mini_app_user_id: i64,
    ) -> RepoResult<Vec<TaskStatistic>>;

    /// Attach one statistics row to a canonical user (own transaction)
    async fn attach_to_user(&self, stat_id: i64, user_id: i64) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<TelegramChannel>>;

    async fn find_by_group_id(&self, group_id: i64) -> RepoResult<Option<TelegramChannel>>;

    /// Insert or update by group id; returns the row id
    async fn upsert(&self, channel: &TelegramChannel) -> RepoResult<i64>;

    async fn list(&self) -> RepoResult<Vec<TelegramChannel>>;
}

// ============================================================================
// Channel Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find(&self, user_id: i64, channel_id: i64)
        -> RepoResult<Option<ChannelSubscription>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ChannelSubscription>>;

    async fn list_for_user(&self, user_id: i64) -> RepoResult<Vec<ChannelSubscription>>;

    /// Create a new subscription; returns the assigned id
    async fn create(&self, subscription: &ChannelSubscription) -> RepoResult<i64>;

    async fn update(&self, subscription: &ChannelSubscription) -> RepoResult<()>;

    /// Remove the subscription row entirely (user kicked)
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Credential Repository
// ============================================================================

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Credential>>;

    async fn find_by_platform(
        &self,
        platform: &str,
        username: &str,
    ) -> RepoResult<Option<Credential>>;

    /// Create the `(platform, username)` record if absent; returns it
    /// either way with its attribute bag intact
    async fn upsert(&self, platform: &str, username: &str) -> RepoResult<Credential>;

    /// Read one key of the credential's attribute bag
    async fn get_attribute(&self, credential_id: i64, key: &str) -> RepoResult<Option<Value>>;

    /// Write one key of the credential's attribute bag
    async fn set_attribute(&self, credential_id: i64, key: &str, value: Value) -> RepoResult<()>;

    /// Remove one key of the credential's attribute bag
    async fn remove_attribute(&self, credential_id: i64, key: &str) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a notification; returns the assigned id
    async fn create(&self, notification: &Notification) -> RepoResult<i64>;

    /// Record the delivery timestamp
    async fn mark_delivered(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Social Login Session Repository
// ============================================================================

#[async_trait]
pub trait LoginSessionRepository: Send + Sync {
    /// Persist a login-attempt audit row; returns the assigned id
    async fn create(&self, session: &SocialLoginSession) -> RepoResult<i64>;
}
