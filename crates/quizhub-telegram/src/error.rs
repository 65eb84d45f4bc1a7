//! Gateway error taxonomy
//!
//! Telegram surfaces most administration failures as opaque description
//! strings; this module maps them onto a closed taxonomy the control
//! plane can act on per target.

use teloxide::{ApiError, RequestError};

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Why a direct message could not be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    /// The user blocked the bot
    Blocked,
    /// The account was deleted or deactivated
    Deactivated,
    /// The user never started a conversation with the bot
    NeverStarted,
}

impl std::fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blocked => f.write_str("user blocked the bot"),
            Self::Deactivated => f.write_str("user account is deactivated"),
            Self::NeverStarted => f.write_str("user never started the bot"),
        }
    }
}

/// Structured failures of channel administration operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("Bot is not an administrator of the chat")]
    BotNotAdmin,

    #[error("Bot is missing the {0} right")]
    BotMissingRight(String),

    #[error("Target user is not a participant of the chat")]
    TargetNotParticipant,

    #[error("Target user is the chat creator")]
    TargetIsCreator,

    #[error("Target administrator is anonymous")]
    TargetAnonymous,

    #[error("Target administrator outranks the bot")]
    RankTooHigh,

    #[error("Chat is unavailable: {0}")]
    ChatUnavailable(String),

    #[error("User is unreachable: {0}")]
    UserUnreachable(UnreachableReason),

    #[error("Operation is not supported for this chat type: {0}")]
    UnsupportedChatType(String),

    #[error("Transient Telegram failure: {0}")]
    Transient(String),
}

impl GatewayError {
    /// Whether a bounded retry may succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Map a raw `teloxide` failure onto the gateway taxonomy.
///
/// Named `ApiError` variants are matched first; the long tail of
/// description-string errors is classified by substring.
#[must_use]
pub fn classify_request_error(err: &RequestError) -> GatewayError {
    match err {
        RequestError::Api(api) => classify_api_error(api),
        RequestError::RetryAfter(secs) => {
            GatewayError::Transient(format!("rate limited, retry after {secs}"))
        }
        RequestError::Network(e) => GatewayError::Transient(format!("network error: {e}")),
        RequestError::Io(e) => GatewayError::Transient(format!("io error: {e}")),
        other => GatewayError::Transient(other.to_string()),
    }
}

fn classify_api_error(api: &ApiError) -> GatewayError {
    match api {
        ApiError::BotBlocked => GatewayError::UserUnreachable(UnreachableReason::Blocked),
        ApiError::UserDeactivated => {
            GatewayError::UserUnreachable(UnreachableReason::Deactivated)
        }
        ApiError::ChatNotFound => GatewayError::ChatUnavailable("chat not found".to_string()),
        ApiError::UserNotFound => GatewayError::TargetNotParticipant,
        ApiError::CantInitiateConversation => {
            GatewayError::UserUnreachable(UnreachableReason::NeverStarted)
        }
        other => classify_description(&other.to_string()),
    }
}

fn classify_description(text: &str) -> GatewayError {
    let lower = text.to_lowercase();

    if lower.contains("chat_admin_required") || lower.contains("bot is not a member") {
        GatewayError::BotNotAdmin
    } else if lower.contains("not enough rights") {
        GatewayError::BotMissingRight(text.to_string())
    } else if lower.contains("can't remove chat owner") || lower.contains("chat owner") {
        GatewayError::TargetIsCreator
    } else if lower.contains("user is an administrator") {
        GatewayError::RankTooHigh
    } else if lower.contains("participant_id_invalid")
        || lower.contains("user_id_invalid")
        || lower.contains("user not found")
        || lower.contains("member not found")
    {
        GatewayError::TargetNotParticipant
    } else if lower.contains("only for supergroups") || lower.contains("group chat was upgraded") {
        GatewayError::UnsupportedChatType(text.to_string())
    } else if lower.contains("chat not found") || lower.contains("channel_private") {
        GatewayError::ChatUnavailable(text.to_string())
    } else {
        GatewayError::Transient(text.to_string())
    }
}
