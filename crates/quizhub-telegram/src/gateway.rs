//! The gateway trait - the seam between the control plane and Telegram

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use quizhub_core::value_objects::TelegramId;

use crate::error::GatewayResult;
use crate::probes::{BotPermissions, ChatInfo, ChatMemberInfo};

/// Result of a demote attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoteOutcome {
    /// Admin rights were removed
    Demoted,
    /// The target held no admin rights; nothing to do
    NotAdmin,
}

/// Channel administration operations against the Bot API.
///
/// All operations are async and return taxonomy-mapped errors; bulk
/// orchestration, local state, and notifications live in the control
/// plane above this trait.
#[async_trait]
pub trait TelegramGateway: Send + Sync {
    /// Fetch a chat snapshot
    async fn get_chat(&self, chat_id: i64) -> GatewayResult<ChatInfo>;

    /// Fetch one member of a chat
    async fn get_chat_member(
        &self,
        chat_id: i64,
        user_id: TelegramId,
    ) -> GatewayResult<ChatMemberInfo>;

    /// What the bot itself may do in the chat
    async fn check_bot_permissions(&self, chat_id: i64) -> GatewayResult<BotPermissions>;

    /// Grant the standard moderator right set. Never grants
    /// `can_promote_members`.
    async fn promote_user_to_admin(&self, chat_id: i64, user_id: TelegramId)
        -> GatewayResult<()>;

    /// Remove admin rights after pre-checks: the target must not be the
    /// creator, and an anonymous admin is demotable only while the bot can
    /// restrict members.
    async fn remove_admin_from_channel(
        &self,
        chat_id: i64,
        user_id: TelegramId,
    ) -> GatewayResult<DemoteOutcome>;

    /// Restrict a supergroup member to no permissions. `until` defaults to
    /// 24 hours from now.
    async fn ban_user_from_channel(
        &self,
        chat_id: i64,
        user_id: TelegramId,
        until: Option<DateTime<Utc>>,
    ) -> GatewayResult<()>;

    /// Restore default member permissions in a supergroup
    async fn unban_user_from_channel(&self, chat_id: i64, user_id: TelegramId)
        -> GatewayResult<()>;

    /// Kick without a lasting ban: demote if needed, lift any existing ban,
    /// then apply a ban that expires within seconds.
    async fn remove_user_from_channel(&self, chat_id: i64, user_id: TelegramId)
        -> GatewayResult<()>;

    /// Deliver an HTML message to a user's private chat
    async fn send_message_to_user(&self, user_id: TelegramId, html: &str) -> GatewayResult<()>;

    /// Sequentially demote one user across many chats. Never aborts early;
    /// returns the success count and one human-readable line per chat.
    async fn remove_admin_from_all_channels(
        &self,
        user_id: TelegramId,
        chat_ids: &[i64],
    ) -> (usize, Vec<String>) {
        let mut success = 0;
        let mut messages = Vec::with_capacity(chat_ids.len());
        for &chat_id in chat_ids {
            match self.remove_admin_from_channel(chat_id, user_id).await {
                Ok(DemoteOutcome::Demoted) => {
                    success += 1;
                    messages.push(format!("chat {chat_id}: admin rights removed"));
                }
                Ok(DemoteOutcome::NotAdmin) => {
                    messages.push(format!("chat {chat_id}: user was not an admin"));
                }
                Err(e) => {
                    messages.push(format!("chat {chat_id}: {e}"));
                }
            }
        }
        (success, messages)
    }
}
