//! `teloxide` implementation of the gateway

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, ChatPermissions, ParseMode, UserId};
use tracing::{debug, instrument, warn};

use quizhub_core::value_objects::TelegramId;

use crate::error::{classify_request_error, GatewayError, GatewayResult};
use crate::gateway::{DemoteOutcome, TelegramGateway};
use crate::probes::{BotPermissions, ChatInfo, ChatKindInfo, ChatMemberInfo, MemberStatus};

/// Default restriction horizon when no explicit `until` is given
const DEFAULT_BAN_HOURS: i64 = 24;

/// A ban this short acts as a kick: the target may rejoin immediately
const KICK_BAN_SECS: i64 = 35;

/// Gateway over the Bot API.
///
/// Holds only the bot token; a fresh `Bot` client is built per high-level
/// call, so the value is cheap to clone and share.
#[derive(Clone)]
pub struct BotGateway {
    token: String,
}

impl BotGateway {
    /// Create a gateway for the given bot token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn bot(&self) -> Bot {
        Bot::new(&self.token)
    }

    fn user(user_id: TelegramId) -> UserId {
        UserId(user_id.into_inner().unsigned_abs())
    }

    /// Member permissions restored on unban
    fn default_member_permissions() -> ChatPermissions {
        ChatPermissions::SEND_MESSAGES
            | ChatPermissions::SEND_MEDIA_MESSAGES
            | ChatPermissions::SEND_OTHER_MESSAGES
            | ChatPermissions::SEND_POLLS
            | ChatPermissions::ADD_WEB_PAGE_PREVIEWS
            | ChatPermissions::INVITE_USERS
    }

    async fn demote(&self, chat_id: i64, user_id: TelegramId) -> GatewayResult<()> {
        // promote with every right unset removes admin status
        let req = self
            .bot()
            .promote_chat_member(ChatId(chat_id), Self::user(user_id));
        req.await.map_err(|e| classify_request_error(&e))?;
        Ok(())
    }

    async fn require_supergroup(&self, chat_id: i64) -> GatewayResult<ChatInfo> {
        let chat = self.get_chat(chat_id).await?;
        if chat.kind != ChatKindInfo::Supergroup {
            return Err(GatewayError::UnsupportedChatType(
                chat.kind.as_str().to_string(),
            ));
        }
        Ok(chat)
    }
}

#[async_trait]
impl TelegramGateway for BotGateway {
    #[instrument(skip(self))]
    async fn get_chat(&self, chat_id: i64) -> GatewayResult<ChatInfo> {
        let chat = self
            .bot()
            .get_chat(ChatId(chat_id))
            .await
            .map_err(|e| classify_request_error(&e))?;

        let kind = if chat.is_supergroup() {
            ChatKindInfo::Supergroup
        } else if chat.is_channel() {
            ChatKindInfo::Channel
        } else if chat.is_group() {
            ChatKindInfo::Group
        } else {
            ChatKindInfo::Private
        };

        Ok(ChatInfo {
            chat_id,
            title: chat.title().map(str::to_string),
            username: chat.username().map(str::to_string),
            kind,
        })
    }

    #[instrument(skip(self))]
    async fn get_chat_member(
        &self,
        chat_id: i64,
        user_id: TelegramId,
    ) -> GatewayResult<ChatMemberInfo> {
        let member = self
            .bot()
            .get_chat_member(ChatId(chat_id), Self::user(user_id))
            .await
            .map_err(|e| classify_request_error(&e))?;

        let status = if member.kind.is_owner() {
            MemberStatus::Owner
        } else if member.kind.is_administrator() {
            MemberStatus::Administrator
        } else if member.kind.is_restricted() {
            MemberStatus::Restricted
        } else if member.kind.is_banned() {
            MemberStatus::Banned
        } else if member.kind.is_left() {
            MemberStatus::Left
        } else {
            MemberStatus::Member
        };

        let is_anonymous = match &member.kind {
            ChatMemberKind::Administrator(a) => a.is_anonymous,
            ChatMemberKind::Owner(o) => o.is_anonymous,
            _ => false,
        };

        Ok(ChatMemberInfo {
            user_id,
            username: member.user.username.clone(),
            first_name: member.user.first_name.clone(),
            last_name: member.user.last_name.clone(),
            is_premium: member.user.is_premium,
            status,
            is_anonymous,
            can_promote_members: member.kind.can_promote_members(),
            can_restrict_members: member.kind.can_restrict_members(),
        })
    }

    #[instrument(skip(self))]
    async fn check_bot_permissions(&self, chat_id: i64) -> GatewayResult<BotPermissions> {
        let bot = self.bot();
        let me = bot.get_me().await.map_err(|e| classify_request_error(&e))?;

        let member = self
            .get_chat_member(chat_id, TelegramId::new(me.id.0.try_into().unwrap_or(i64::MAX)))
            .await?;

        Ok(BotPermissions {
            is_admin: member.is_admin(),
            can_promote_members: member.can_promote_members,
            can_restrict_members: member.can_restrict_members,
            can_invite_users: member.is_admin(),
        })
    }

    #[instrument(skip(self))]
    async fn promote_user_to_admin(
        &self,
        chat_id: i64,
        user_id: TelegramId,
    ) -> GatewayResult<()> {
        let member = self.get_chat_member(chat_id, user_id).await?;
        if member.status == MemberStatus::Owner {
            return Err(GatewayError::TargetIsCreator);
        }

        // Standard moderator right set; promotion rights are never granted.
        let mut req = self
            .bot()
            .promote_chat_member(ChatId(chat_id), Self::user(user_id));
        req.can_manage_chat = Some(true);
        req.can_delete_messages = Some(true);
        req.can_manage_video_chats = Some(true);
        req.can_restrict_members = Some(true);
        req.can_invite_users = Some(true);
        req.can_pin_messages = Some(true);
        req.can_promote_members = Some(false);

        req.await.map_err(|e| classify_request_error(&e))?;
        debug!(chat_id, %user_id, "promoted user to admin");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_admin_from_channel(
        &self,
        chat_id: i64,
        user_id: TelegramId,
    ) -> GatewayResult<DemoteOutcome> {
        let member = self.get_chat_member(chat_id, user_id).await?;

        match member.status {
            MemberStatus::Owner => return Err(GatewayError::TargetIsCreator),
            MemberStatus::Administrator => {}
            _ => return Ok(DemoteOutcome::NotAdmin),
        }

        if member.is_anonymous {
            let bot_perms = self.check_bot_permissions(chat_id).await?;
            if !bot_perms.can_restrict_members {
                return Err(GatewayError::TargetAnonymous);
            }
        }

        self.demote(chat_id, user_id).await?;
        debug!(chat_id, %user_id, "removed admin rights");
        Ok(DemoteOutcome::Demoted)
    }

    #[instrument(skip(self))]
    async fn ban_user_from_channel(
        &self,
        chat_id: i64,
        user_id: TelegramId,
        until: Option<DateTime<Utc>>,
    ) -> GatewayResult<()> {
        self.require_supergroup(chat_id).await?;

        let until = until.unwrap_or_else(|| Utc::now() + Duration::hours(DEFAULT_BAN_HOURS));
        let mut req = self.bot().restrict_chat_member(
            ChatId(chat_id),
            Self::user(user_id),
            ChatPermissions::empty(),
        );
        req.until_date = Some(until);

        req.await.map_err(|e| classify_request_error(&e))?;
        debug!(chat_id, %user_id, %until, "restricted user");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn unban_user_from_channel(
        &self,
        chat_id: i64,
        user_id: TelegramId,
    ) -> GatewayResult<()> {
        self.require_supergroup(chat_id).await?;

        self.bot()
            .restrict_chat_member(
                ChatId(chat_id),
                Self::user(user_id),
                Self::default_member_permissions(),
            )
            .await
            .map_err(|e| classify_request_error(&e))?;
        debug!(chat_id, %user_id, "restored member permissions");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_user_from_channel(
        &self,
        chat_id: i64,
        user_id: TelegramId,
    ) -> GatewayResult<()> {
        let member = self.get_chat_member(chat_id, user_id).await?;
        if member.status == MemberStatus::Owner {
            return Err(GatewayError::TargetIsCreator);
        }
        if member.status == MemberStatus::Administrator {
            self.demote(chat_id, user_id).await?;
        }

        // Lift any standing ban so the short ban below acts as a plain kick
        let bot = self.bot();
        let mut unban = bot.unban_chat_member(ChatId(chat_id), Self::user(user_id));
        unban.only_if_banned = Some(true);
        if let Err(e) = unban.await {
            warn!(chat_id, %user_id, error = %e, "pre-kick unban failed");
        }

        let mut kick = bot.ban_chat_member(ChatId(chat_id), Self::user(user_id));
        kick.until_date = Some(Utc::now() + Duration::seconds(KICK_BAN_SECS));
        kick.await.map_err(|e| classify_request_error(&e))?;
        debug!(chat_id, %user_id, "kicked user");
        Ok(())
    }

    #[instrument(skip(self, html))]
    async fn send_message_to_user(&self, user_id: TelegramId, html: &str) -> GatewayResult<()> {
        self.bot()
            .send_message(ChatId(user_id.into_inner()), html)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| classify_request_error(&e))?;
        Ok(())
    }
}
