//! Bulk channel administration
//!
//! Every operation works target by target: remote mutation first, then the
//! local relation, then a best-effort notification. The next target never
//! starts before the previous target's notification attempt finished, and
//! one bad target never aborts the rest.
//!
//! Admin actions are authoritative for ChannelSubscription state; the
//! Telegram-side sync refreshes profile fields only.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};

use quizhub_core::entities::{ChannelSubscription, Notification, TelegramChannel};
use quizhub_core::value_objects::{SubscriptionState, TelegramId};
use quizhub_core::DomainError;
use quizhub_telegram::{DemoteOutcome, GatewayError};

use crate::context::AdminContext;
use crate::error::AdminResult;
use crate::report::Report;
use crate::templates;

const DEFAULT_BAN_HOURS: i64 = 24;

/// The admin control plane
pub struct AdminService<'a> {
    ctx: &'a AdminContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a AdminContext) -> Self {
        Self { ctx }
    }

    /// Demote an administrator in every channel they are locally related
    /// to, clearing the relations as it goes.
    ///
    /// The user gets one notification at the end, listing only the
    /// channels whose rights were actually revoked.
    #[instrument(skip(self))]
    pub async fn remove_admin_rights_from_all_channels(
        &self,
        telegram_id: TelegramId,
    ) -> AdminResult<Report> {
        let admin = self
            .ctx
            .admin_repo()
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or(DomainError::AdminNotFound(telegram_id))?;
        let channels = self.ctx.admin_repo().channels_for(admin.id).await?;

        let mut report = Report::new();
        let mut revoked = Vec::new();
        for channel in channels {
            if self
                .demote_in_channel(admin.id, telegram_id, &channel, &mut report)
                .await
            {
                revoked.push(channel);
            }
        }
        if !revoked.is_empty() {
            self.notify(telegram_id, &templates::demoted(&revoked)).await;
        }
        Ok(report)
    }

    /// Demote everywhere, then delete the admin record itself.
    ///
    /// The record is deleted even when some targets failed; leftover
    /// remote rights show up as error lines and can be retried by group.
    #[instrument(skip(self))]
    pub async fn delete_admin_completely(&self, telegram_id: TelegramId) -> AdminResult<Report> {
        let admin = self
            .ctx
            .admin_repo()
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or(DomainError::AdminNotFound(telegram_id))?;

        let mut report = self
            .remove_admin_rights_from_all_channels(telegram_id)
            .await?;

        self.ctx.admin_repo().delete(admin.id).await?;
        info!(admin_id = admin.id, "admin record deleted");
        self.notify(telegram_id, &templates::admin_deleted()).await;
        report.success("admin record deleted");
        Ok(report)
    }

    /// Promote a known admin in the given channels.
    ///
    /// The local relation is checked first; an existing relation is a
    /// warning, not a remote call.
    #[instrument(skip(self, channel_ids))]
    pub async fn promote_to_admin(
        &self,
        telegram_id: TelegramId,
        channel_ids: &[i64],
    ) -> AdminResult<Report> {
        let admin = self
            .ctx
            .admin_repo()
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or(DomainError::AdminNotFound(telegram_id))?;

        let mut report = Report::new();
        for &channel_id in channel_ids {
            let channel = match self.ctx.channel_repo().find_by_id(channel_id).await {
                Ok(Some(channel)) => channel,
                Ok(None) => {
                    report.error(format!("channel {channel_id}: not found"));
                    continue;
                }
                Err(e) => {
                    report.error(format!("channel {channel_id}: {e}"));
                    continue;
                }
            };

            match self.ctx.admin_repo().is_admin_of(admin.id, channel.id).await {
                Ok(true) => {
                    report.warning(format!("{}: already an administrator", channel.title));
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    report.error(format!("{}: {e}", channel.title));
                    continue;
                }
            }

            match self
                .ctx
                .gateway()
                .promote_user_to_admin(channel.group_id, telegram_id)
                .await
            {
                Ok(()) => {
                    if let Err(e) = self.ctx.admin_repo().add_channel(admin.id, channel.id).await {
                        report.error(format!(
                            "{}: promoted remotely, local relation not recorded: {e}",
                            channel.title
                        ));
                        continue;
                    }
                    self.notify(telegram_id, &templates::promoted(&channel)).await;
                    report.success(format!("{}: promoted", channel.title));
                }
                Err(e) => report.error(format!("{}: {e}", channel.title)),
            }
        }
        Ok(report)
    }

    /// Ban a canonical user in one channel.
    ///
    /// `until` overrides the 24-hour default horizon; unbounded bans are
    /// not offered. A non-supergroup target is a warning, and the local
    /// state is updated regardless because admin actions are authoritative.
    #[instrument(skip(self))]
    pub async fn ban_from_channel(
        &self,
        user_id: i64,
        channel_id: i64,
        until: Option<DateTime<Utc>>,
    ) -> AdminResult<Report> {
        let (telegram_id, channel) = self.resolve_target(user_id, channel_id).await?;
        let until = until.unwrap_or_else(|| Utc::now() + Duration::hours(DEFAULT_BAN_HOURS));

        let mut report = Report::new();
        match self
            .ctx
            .gateway()
            .ban_user_from_channel(channel.group_id, telegram_id, Some(until))
            .await
        {
            Ok(()) => {}
            Err(GatewayError::UnsupportedChatType(kind)) => {
                report.warning(format!(
                    "{}: restriction skipped, chat is a {kind}",
                    channel.title
                ));
            }
            Err(e) => {
                report.error(format!("{}: {e}", channel.title));
                return Ok(report);
            }
        }

        let mut subscription = self
            .ctx
            .subscription_repo()
            .find(user_id, channel.id)
            .await?
            .unwrap_or_else(|| ChannelSubscription::new(user_id, channel.id));
        subscription.transition(SubscriptionState::Banned, Some(until))?;
        self.persist_subscription(subscription).await?;

        self.notify(telegram_id, &templates::banned(&channel, until))
            .await;
        report.success(format!(
            "{}: banned until {}",
            channel.title,
            until.format("%Y-%m-%d %H:%M UTC")
        ));
        Ok(report)
    }

    /// Lift a ban and restore default member permissions.
    #[instrument(skip(self))]
    pub async fn unban_from_channel(&self, user_id: i64, channel_id: i64) -> AdminResult<Report> {
        let (telegram_id, channel) = self.resolve_target(user_id, channel_id).await?;

        let mut report = Report::new();
        match self
            .ctx
            .gateway()
            .unban_user_from_channel(channel.group_id, telegram_id)
            .await
        {
            Ok(()) => {}
            Err(GatewayError::UnsupportedChatType(kind)) => {
                report.warning(format!(
                    "{}: permission restore skipped, chat is a {kind}",
                    channel.title
                ));
            }
            Err(e) => {
                report.error(format!("{}: {e}", channel.title));
                return Ok(report);
            }
        }

        let mut subscription = self
            .ctx
            .subscription_repo()
            .find(user_id, channel.id)
            .await?
            .ok_or(DomainError::SubscriptionNotFound {
                user_id,
                channel_id: channel.id,
            })?;
        subscription.transition(SubscriptionState::Active, None)?;
        self.ctx.subscription_repo().update(&subscription).await?;

        self.notify(telegram_id, &templates::unbanned(&channel)).await;
        report.success(format!("{}: unbanned", channel.title));
        Ok(report)
    }

    /// Kick a canonical user out of a channel without a lasting ban and
    /// drop the subscription row.
    #[instrument(skip(self))]
    pub async fn remove_from_channel(&self, user_id: i64, channel_id: i64) -> AdminResult<Report> {
        let (telegram_id, channel) = self.resolve_target(user_id, channel_id).await?;

        let mut report = Report::new();
        if let Err(e) = self
            .ctx
            .gateway()
            .remove_user_from_channel(channel.group_id, telegram_id)
            .await
        {
            report.error(format!("{}: {e}", channel.title));
            return Ok(report);
        }

        if let Some(subscription) = self.ctx.subscription_repo().find(user_id, channel.id).await? {
            self.ctx.subscription_repo().delete(subscription.id).await?;
        }

        self.notify(telegram_id, &templates::removed(&channel)).await;
        report.success(format!("{}: removed", channel.title));
        Ok(report)
    }

    /// Probe the bot's own permissions in every known channel.
    #[instrument(skip(self))]
    pub async fn check_bot_permissions_in_channels(&self) -> AdminResult<Report> {
        let channels = self.ctx.channel_repo().list().await?;

        let mut report = Report::new();
        for channel in channels {
            match self.ctx.gateway().check_bot_permissions(channel.group_id).await {
                Ok(permissions) if permissions.is_sufficient() => {
                    report.success(format!("{}: bot permissions ok", channel.title));
                }
                Ok(permissions) if permissions.is_admin => {
                    report.warning(format!(
                        "{}: bot is an admin but lacks promote/restrict rights",
                        channel.title
                    ));
                }
                Ok(_) => {
                    report.warning(format!("{}: bot is not an administrator", channel.title));
                }
                Err(e) => report.error(format!("{}: {e}", channel.title)),
            }
        }
        Ok(report)
    }

    /// Refresh a chat user's profile fields from Telegram.
    ///
    /// Walks the user's subscribed channels until one yields a member
    /// snapshot; subscription state is never touched here.
    #[instrument(skip(self))]
    pub async fn sync_with_telegram(&self, user_id: i64) -> AdminResult<Report> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        let telegram_id = user.telegram_id.ok_or(DomainError::MissingTelegramId)?;
        let subscriptions = self.ctx.subscription_repo().list_for_user(user_id).await?;

        let mut report = Report::new();
        let mut refreshed = false;
        for subscription in subscriptions {
            let channel = match self
                .ctx
                .channel_repo()
                .find_by_id(subscription.channel_id)
                .await
            {
                Ok(Some(channel)) => channel,
                Ok(None) => {
                    report.error(format!("channel {}: not found", subscription.channel_id));
                    continue;
                }
                Err(e) => {
                    report.error(format!("channel {}: {e}", subscription.channel_id));
                    continue;
                }
            };

            match self
                .ctx
                .gateway()
                .get_chat_member(channel.group_id, telegram_id)
                .await
            {
                Ok(member) => {
                    if !refreshed {
                        self.refresh_chat_user(telegram_id, &member).await;
                        refreshed = true;
                    }
                    report.success(format!("{}: member status {:?}", channel.title, member.status));
                }
                Err(e) => report.warning(format!("{}: {e}", channel.title)),
            }
        }
        Ok(report)
    }

    // One demote target: remote, then local relation. Returns whether the
    // channel belongs in the aggregated revocation notice.
    async fn demote_in_channel(
        &self,
        admin_id: i64,
        telegram_id: TelegramId,
        channel: &TelegramChannel,
        report: &mut Report,
    ) -> bool {
        match self
            .ctx
            .gateway()
            .remove_admin_from_channel(channel.group_id, telegram_id)
            .await
        {
            Ok(DemoteOutcome::Demoted) => {
                if let Err(e) = self
                    .ctx
                    .admin_repo()
                    .remove_channel(admin_id, channel.id)
                    .await
                {
                    report.error(format!(
                        "{}: rights removed remotely, local relation not cleared: {e}",
                        channel.title
                    ));
                    return false;
                }
                report.success(format!("{}: admin rights removed", channel.title));
                true
            }
            Ok(DemoteOutcome::NotAdmin) => {
                // Remote already agrees; just reconcile the local relation.
                if let Err(e) = self
                    .ctx
                    .admin_repo()
                    .remove_channel(admin_id, channel.id)
                    .await
                {
                    warn!(channel_id = channel.id, error = %e, "stale relation not cleared");
                }
                report.warning(format!("{}: user was not an admin", channel.title));
                false
            }
            Err(e) => {
                report.error(format!("{}: {e}", channel.title));
                false
            }
        }
    }

    async fn resolve_target(
        &self,
        user_id: i64,
        channel_id: i64,
    ) -> AdminResult<(TelegramId, TelegramChannel)> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        let telegram_id = user.telegram_id.ok_or(DomainError::MissingTelegramId)?;
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;
        Ok((telegram_id, channel))
    }

    async fn persist_subscription(&self, subscription: ChannelSubscription) -> AdminResult<()> {
        if subscription.id == 0 {
            self.ctx.subscription_repo().create(&subscription).await?;
        } else {
            self.ctx.subscription_repo().update(&subscription).await?;
        }
        Ok(())
    }

    async fn refresh_chat_user(
        &self,
        telegram_id: TelegramId,
        member: &quizhub_telegram::ChatMemberInfo,
    ) {
        let mut chat_user = match self.ctx.chat_user_repo().find_by_telegram_id(telegram_id).await {
            Ok(Some(chat_user)) => chat_user,
            Ok(None) => quizhub_core::entities::TelegramChatUser::new(telegram_id),
            Err(e) => {
                warn!(error = %e, "chat user lookup failed during sync");
                return;
            }
        };

        // Sync semantics: remote values win.
        chat_user.username.clone_from(&member.username);
        chat_user.first_name = Some(member.first_name.clone());
        chat_user.last_name.clone_from(&member.last_name);
        chat_user.is_premium = member.is_premium;
        chat_user.updated_at = Utc::now();

        if let Err(e) = self.ctx.chat_user_repo().upsert(&chat_user).await {
            warn!(error = %e, "chat user profile refresh failed");
        }
    }

    // Persist the notification, attempt delivery, record the result.
    // Best-effort throughout; never gates the DB write that preceded it.
    async fn notify(&self, recipient: TelegramId, html: &str) {
        let row_id = match self
            .ctx
            .notification_repo()
            .create(&Notification::to_user(recipient, html))
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(%recipient, error = %e, "notification row not written");
                None
            }
        };

        match self.ctx.gateway().send_message_to_user(recipient, html).await {
            Ok(()) => {
                if let Some(id) = row_id {
                    if let Err(e) = self.ctx.notification_repo().mark_delivered(id).await {
                        warn!(notification_id = id, error = %e, "delivery not recorded");
                    }
                }
            }
            Err(e) => warn!(%recipient, error = %e, "notification not delivered"),
        }
    }
}
