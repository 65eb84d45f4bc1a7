//! # quizhub-telegram
//!
//! Telegram bot gateway: permission probes and channel administration
//! primitives over the Bot API.
//!
//! The [`TelegramGateway`] trait is the seam the control plane depends on;
//! [`BotGateway`] is the `teloxide` implementation. Every high-level call
//! builds a fresh `Bot` client, so the gateway itself carries no
//! connection state and is freely cloneable.

pub mod blocking;
pub mod bot_gateway;
pub mod error;
pub mod gateway;
pub mod probes;

pub use bot_gateway::BotGateway;
pub use error::{GatewayError, GatewayResult, UnreachableReason};
pub use gateway::{DemoteOutcome, TelegramGateway};
pub use probes::{BotPermissions, ChatInfo, ChatKindInfo, ChatMemberInfo, MemberStatus};
