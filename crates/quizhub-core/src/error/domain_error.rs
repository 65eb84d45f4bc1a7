//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Provider, SubscriptionState, TelegramId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("No user with telegram id {0}")]
    TelegramUserNotFound(TelegramId),

    #[error("Telegram admin not found: {0}")]
    AdminNotFound(TelegramId),

    #[error("Mini-App user not found: {0}")]
    MiniAppUserNotFound(TelegramId),

    #[error("Channel not found: {0}")]
    ChannelNotFound(i64),

    #[error("Subscription not found for user {user_id} in channel {channel_id}")]
    SubscriptionNotFound { user_id: i64, channel_id: i64 },

    #[error("Social account not found: {provider}:{provider_user_id}")]
    SocialAccountNotFound {
        provider: Provider,
        provider_user_id: String,
    },

    #[error("Credential not found: {0}")]
    CredentialNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Signature verification failed")]
    InvalidSignature,

    #[error("Auth payload is older than the allowed window")]
    StaleAuthDate,

    #[error("Payload is missing a telegram id")]
    MissingTelegramId,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    // =========================================================================
    // Authorization / Policy Errors
    // =========================================================================
    #[error("User account is deactivated")]
    InactiveUser,

    #[error("OAuth state mismatch")]
    StateMismatch,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Telegram id already linked to another user")]
    TelegramIdAlreadyLinked,

    #[error("Social account already attached: {provider}")]
    DuplicateSocialAccount { provider: Provider },

    #[error("User is already an administrator of this channel")]
    AlreadyAdmin,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Invalid subscription transition: {from} -> {to}")]
    InvalidStateTransition {
        from: SubscriptionState,
        to: SubscriptionState,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::TelegramUserNotFound(_) => "UNKNOWN_TELEGRAM_USER",
            Self::AdminNotFound(_) => "UNKNOWN_ADMIN",
            Self::MiniAppUserNotFound(_) => "UNKNOWN_MINI_APP_USER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::SubscriptionNotFound { .. } => "UNKNOWN_SUBSCRIPTION",
            Self::SocialAccountNotFound { .. } => "UNKNOWN_SOCIAL_ACCOUNT",
            Self::CredentialNotFound(_) => "UNKNOWN_CREDENTIAL",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::StaleAuthDate => "STALE_AUTH_DATE",
            Self::MissingTelegramId => "MISSING_TELEGRAM_ID",
            Self::InvalidUsername(_) => "INVALID_USERNAME",

            // Policy
            Self::InactiveUser => "INACTIVE_USER",
            Self::StateMismatch => "STATE_MISMATCH",

            // Conflict
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::TelegramIdAlreadyLinked => "TELEGRAM_ID_ALREADY_LINKED",
            Self::DuplicateSocialAccount { .. } => "DUPLICATE_SOCIAL_ACCOUNT",
            Self::AlreadyAdmin => "ALREADY_ADMIN",

            // Business rules
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::TelegramUserNotFound(_)
                | Self::AdminNotFound(_)
                | Self::MiniAppUserNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::SubscriptionNotFound { .. }
                | Self::SocialAccountNotFound { .. }
                | Self::CredentialNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidSignature
                | Self::StaleAuthDate
                | Self::MissingTelegramId
                | Self::InvalidUsername(_)
        )
    }

    /// Check if this is an auth-policy error
    pub fn is_auth_policy(&self) -> bool {
        matches!(self, Self::InactiveUser | Self::StateMismatch)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameTaken
                | Self::EmailAlreadyExists
                | Self::TelegramIdAlreadyLinked
                | Self::DuplicateSocialAccount { .. }
                | Self::AlreadyAdmin
        )
    }
}
