//! Telegram Login Widget reconciler
//!
//! Verifies the widget signature and freshness, then resolves or creates
//! the canonical user behind the Telegram identity.

use chrono::Utc;
use tracing::{info, instrument};

use quizhub_common::auth::{verify_widget_payload, WidgetPayload};
use quizhub_core::entities::CanonicalUser;
use quizhub_core::value_objects::{merge_field, Provider, TelegramId};
use quizhub_core::DomainError;

use crate::dto::{LoginMeta, LoginOutcome};
use crate::oauth::ProviderProfile;

use super::audit;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::identity::{IdentityService, LookupKeys};
use super::username;

/// Widget-based login service
pub struct TelegramAuthService<'a> {
    ctx: &'a ServiceContext,
    bot_token: String,
}

impl<'a> TelegramAuthService<'a> {
    pub fn new(ctx: &'a ServiceContext, bot_token: impl Into<String>) -> Self {
        Self {
            ctx,
            bot_token: bot_token.into(),
        }
    }

    /// Log a user in from a Telegram Login Widget payload.
    ///
    /// # Errors
    /// Signature, freshness, and id checks fail with the corresponding
    /// validation error before any state is touched; an inactive matched
    /// user is a hard failure.
    #[instrument(skip(self, payload, meta), fields(telegram_id = payload.id))]
    pub async fn login(
        &self,
        payload: WidgetPayload,
        meta: LoginMeta,
    ) -> ServiceResult<LoginOutcome> {
        verify_widget_payload(&payload, &self.bot_token, Utc::now())?;

        let telegram_id = TelegramId::new(payload.id);
        let profile = ProviderProfile::from_widget(&payload);
        let identity = IdentityService::new(self.ctx);

        let existing_account = self
            .ctx
            .social_account_repo()
            .find_by_provider_user(Provider::Telegram, &profile.provider_user_id)
            .await?;

        let (mut user, is_new_user) = match &existing_account {
            Some(account) => {
                let user = self
                    .ctx
                    .user_repo()
                    .find_by_id(account.user_id)
                    .await?
                    .ok_or(DomainError::UserNotFound(account.user_id))?;
                (user, false)
            }
            None => {
                let keys = LookupKeys {
                    telegram_id: Some(telegram_id),
                    ..LookupKeys::default()
                };
                match identity.find_canonical(keys).await? {
                    Some(found) => (found.user, false),
                    None => (self.create_user(&payload, telegram_id).await?, true),
                }
            }
        };

        if !user.is_active {
            audit::record_failure(
                self.ctx,
                existing_account.as_ref().map(|a| a.id),
                &meta,
                "User account is deactivated",
            )
            .await;
            return Err(DomainError::InactiveUser.into());
        }

        if user.telegram_id.is_none() {
            user.telegram_id = Some(telegram_id);
        }
        user.is_telegram_user = true;
        merge_field(&mut user.first_name, payload.first_name.as_deref());
        merge_field(&mut user.last_name, payload.last_name.as_deref());
        // Remote photo only when the user has no avatar of any kind
        if !user.has_avatar() {
            user.avatar_url.clone_from(&payload.photo_url);
        }

        let account = identity.link(&user, &profile).await?;
        identity.propagate_profile(&mut user).await?;

        let session_id = audit::record_success(self.ctx, account.id, &meta).await;
        info!(user_id = user.id, is_new_user, "telegram login completed");

        Ok(LoginOutcome {
            user,
            social_account: account,
            is_new_user,
            session_id,
        })
    }

    async fn create_user(
        &self,
        payload: &WidgetPayload,
        telegram_id: TelegramId,
    ) -> ServiceResult<CanonicalUser> {
        let candidates = username::telegram_candidates(
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
            payload.username.as_deref(),
            telegram_id,
        );
        let name = username::resolve_unique(self.ctx.user_repo(), &candidates).await?;

        let mut user = CanonicalUser::new(name);
        user.telegram_id = Some(telegram_id);
        user.is_telegram_user = true;
        user.first_name.clone_from(&payload.first_name);
        user.last_name.clone_from(&payload.last_name);
        user.avatar_url.clone_from(&payload.photo_url);
        user.id = self.ctx.user_repo().create(&user).await?;

        info!(user_id = user.id, username = %user.username, "canonical user created from widget");
        Ok(user)
    }
}
