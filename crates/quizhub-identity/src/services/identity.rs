//! Identity graph service
//!
//! Keeps the four representations of a person (canonical user, chat user,
//! Telegram admin, Mini-App user) and their social accounts consistent.
//! Lookups never merge two people automatically; linking only wires
//! cross-references, and profile propagation follows the non-overwriting
//! field policy.

use chrono::Utc;
use tracing::{info, instrument, warn};

use quizhub_core::entities::{CanonicalUser, SiteAdmin, SocialAccount};
use quizhub_core::value_objects::{merge_field, Provider, TelegramId};
use quizhub_core::DomainError;

use crate::oauth::ProviderProfile;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Which rule produced a canonical-user match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    TelegramId,
    Email,
    /// Email asserted by a social account of a user without a Telegram account
    SocialEmail,
    UsernameCaseInsensitive,
}

/// A canonical user found by [`IdentityService::find_canonical`]
#[derive(Debug, Clone)]
pub struct CanonicalMatch {
    pub user: CanonicalUser,
    pub rule: MatchRule,
}

/// Lookup keys for canonical-user resolution, tried in declaration order
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupKeys<'a> {
    pub telegram_id: Option<TelegramId>,
    pub email: Option<&'a str>,
    pub username: Option<&'a str>,
}

/// Outcome of a statistics merge; failures are isolated per row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub attached: usize,
    pub failed: usize,
}

/// Identity graph operations
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a canonical user by ordered lookup.
    ///
    /// Order: exact telegram id; exact email (own column, then email
    /// asserted by a social account of a Telegram-less user);
    /// case-insensitive username. Returns the first hit with the rule that
    /// produced it. Never merges candidates.
    #[instrument(skip(self, by), fields(has_tid = by.telegram_id.is_some(), has_email = by.email.is_some()))]
    pub async fn find_canonical(&self, by: LookupKeys<'_>) -> ServiceResult<Option<CanonicalMatch>> {
        if let Some(telegram_id) = by.telegram_id {
            if let Some(user) = self.ctx.user_repo().find_by_telegram_id(telegram_id).await? {
                return Ok(Some(CanonicalMatch {
                    user,
                    rule: MatchRule::TelegramId,
                }));
            }
        }

        if let Some(email) = by.email.map(str::trim).filter(|e| !e.is_empty()) {
            if let Some(user) = self.ctx.user_repo().find_by_email(email).await? {
                return Ok(Some(CanonicalMatch {
                    user,
                    rule: MatchRule::Email,
                }));
            }
            if let Some(user) = self.ctx.user_repo().find_by_social_email(email).await? {
                return Ok(Some(CanonicalMatch {
                    user,
                    rule: MatchRule::SocialEmail,
                }));
            }
        }

        if let Some(username) = by.username.map(str::trim).filter(|u| !u.is_empty()) {
            if let Some(user) = self.ctx.user_repo().find_by_username_ci(username).await? {
                return Ok(Some(CanonicalMatch {
                    user,
                    rule: MatchRule::UsernameCaseInsensitive,
                }));
            }
        }

        Ok(None)
    }

    /// Attach or refresh the social account a provider payload describes.
    ///
    /// Idempotent: re-login updates the existing account in place and bumps
    /// `last_login_at`. Attaching an account that already belongs to a
    /// different user is a conflict. Finishes with the cross-reference
    /// fan-out over the other representations.
    #[instrument(skip(self, user, profile), fields(user_id = user.id, provider = %profile.provider))]
    pub async fn link(
        &self,
        user: &CanonicalUser,
        profile: &ProviderProfile,
    ) -> ServiceResult<SocialAccount> {
        let repo = self.ctx.social_account_repo();

        let mut account = match repo
            .find_by_provider_user(profile.provider, &profile.provider_user_id)
            .await?
        {
            Some(existing) => {
                if existing.user_id != user.id {
                    return Err(DomainError::DuplicateSocialAccount {
                        provider: profile.provider,
                    }
                    .into());
                }
                existing
            }
            None => SocialAccount::new(user.id, profile.provider, profile.provider_user_id.clone()),
        };

        merge_field(&mut account.username, profile.username.as_deref());
        merge_field(&mut account.email, profile.email.as_deref());
        merge_field(&mut account.first_name, profile.first_name.as_deref());
        merge_field(&mut account.last_name, profile.last_name.as_deref());
        merge_field(&mut account.avatar_url, profile.avatar_url.as_deref());
        // Tokens are replaced wholesale on every login that carries them.
        if profile.access_token.is_some() {
            account.access_token.clone_from(&profile.access_token);
            account.refresh_token.clone_from(&profile.refresh_token);
            account.token_expires_at = profile.token_expires_at;
        }
        account.is_active = true;
        account.touch_last_login();

        if account.id == 0 {
            account.id = repo.create(&account).await?;
            info!(account_id = account.id, "social account attached");
        } else {
            repo.update(&account).await?;
        }

        self.auto_link_existing_users(user).await;
        Ok(account)
    }

    /// Wire cross-references from the other representations to this user.
    ///
    /// Matches by telegram id (chat user, admin, Mini-App user) and by
    /// username (site admin). Every step is guarded; a failing link is
    /// logged and never aborts the login that triggered it.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn auto_link_existing_users(&self, user: &CanonicalUser) {
        let Some(telegram_id) = user.telegram_id else {
            return;
        };

        let chat_user_id = match self.ctx.chat_user_repo().find_by_telegram_id(telegram_id).await {
            Ok(Some(mut chat_user)) => {
                let id = chat_user.id;
                if chat_user.site_user_id != Some(user.id) {
                    chat_user.site_user_id = Some(user.id);
                    chat_user.updated_at = Utc::now();
                    if let Err(e) = self.ctx.chat_user_repo().update(&chat_user).await {
                        warn!(error = %e, "chat user back-link failed");
                    }
                }
                Some(id)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "chat user lookup failed");
                None
            }
        };

        let admin_id = match self.ctx.admin_repo().find_by_telegram_id(telegram_id).await {
            Ok(admin) => admin.map(|a| a.id),
            Err(e) => {
                warn!(error = %e, "admin lookup failed");
                None
            }
        };

        let site_admin_id = match self.ctx.site_admin_repo().find_by_username(&user.username).await
        {
            Ok(admin) => admin.map(|a| a.id),
            Err(e) => {
                warn!(error = %e, "site admin lookup failed");
                None
            }
        };

        match self.ctx.mini_app_repo().find_by_telegram_id(telegram_id).await {
            Ok(Some(mut mini)) => {
                let was_linked = mini.is_linked();
                let mut changed = false;
                if mini.site_user_id != Some(user.id) {
                    mini.site_user_id = Some(user.id);
                    changed = true;
                }
                if chat_user_id.is_some() && mini.chat_user_id != chat_user_id {
                    mini.chat_user_id = chat_user_id;
                    changed = true;
                }
                if admin_id.is_some() && mini.admin_id != admin_id {
                    mini.admin_id = admin_id;
                    changed = true;
                }
                if site_admin_id.is_some() && mini.site_admin_id != site_admin_id {
                    mini.site_admin_id = site_admin_id;
                    changed = true;
                }
                if changed {
                    mini.updated_at = Utc::now();
                    if let Err(e) = self.ctx.mini_app_repo().update(&mini).await {
                        warn!(error = %e, "mini-app back-link failed");
                    }
                }
                if !was_linked {
                    let report = self.merge_statistics(mini.id, user.id).await;
                    info!(
                        attached = report.attached,
                        failed = report.failed,
                        "statistics merged on first link"
                    );
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "mini-app lookup failed"),
        }
    }

    /// Propagate profile data between the canonical user and its
    /// projections.
    ///
    /// Enforces the SiteAdmin biconditional, rebuilds the `github` and
    /// `telegram` links from the social accounts, and exchanges
    /// non-overwriting fields with the linked Mini-App profile. The
    /// Mini-App sync is best-effort and never fails the caller.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn propagate_profile(&self, user: &mut CanonicalUser) -> ServiceResult<()> {
        let mut user_changed = false;

        // github link: always rebuilt from the account login, never from email
        if let Some(account) = self
            .ctx
            .social_account_repo()
            .find_for_user(user.id, Provider::Github)
            .await?
        {
            if let Some(url) = account.github_profile_url() {
                if user.social.github.as_deref() != Some(url.as_str()) {
                    user.social.github = Some(url);
                    user_changed = true;
                }
            }
        }

        // telegram link: managed only through the Telegram account username
        if let Some(account) = self
            .ctx
            .social_account_repo()
            .find_for_user(user.id, Provider::Telegram)
            .await?
        {
            if let Some(url) = account.telegram_profile_url() {
                if user.social.telegram.as_deref() != Some(url.as_str()) {
                    user.social.telegram = Some(url);
                    user_changed = true;
                }
            }
        }

        // SiteAdmin exists if and only if the user is staff or superuser
        if user.is_site_admin() {
            self.ctx
                .site_admin_repo()
                .upsert(&SiteAdmin::from_user(user))
                .await?;
        } else {
            self.ctx
                .site_admin_repo()
                .delete_by_username(&user.username)
                .await?;
        }

        // Mini-App two-way sync, guarded per-try
        match self.ctx.mini_app_repo().find_by_site_user(user.id).await {
            Ok(Some(mut mini)) => {
                let mut mini_changed = false;

                // pull: fill canonical gaps from the richer profile
                user_changed |= fill_if_empty(&mut user.first_name, mini.first_name.as_deref());
                user_changed |= fill_if_empty(&mut user.last_name, mini.last_name.as_deref());
                user_changed |=
                    fill_if_empty(&mut user.social.instagram, mini.social.instagram.as_deref());
                user_changed |=
                    fill_if_empty(&mut user.social.facebook, mini.social.facebook.as_deref());
                user_changed |=
                    fill_if_empty(&mut user.social.linkedin, mini.social.linkedin.as_deref());
                user_changed |=
                    fill_if_empty(&mut user.social.youtube, mini.social.youtube.as_deref());
                user_changed |=
                    fill_if_empty(&mut user.social.website, mini.social.website.as_deref());

                // push: canonical values win when non-empty
                mini_changed |= merge_field(&mut mini.first_name, user.first_name.as_deref());
                mini_changed |= merge_field(&mut mini.last_name, user.last_name.as_deref());
                mini_changed |= merge_field(&mut mini.username, Some(user.username.as_str()));
                mini_changed |=
                    merge_field(&mut mini.social.telegram, user.social.telegram.as_deref());
                mini_changed |= merge_field(&mut mini.social.github, user.social.github.as_deref());
                mini_changed |=
                    merge_field(&mut mini.social.instagram, user.social.instagram.as_deref());
                mini_changed |=
                    merge_field(&mut mini.social.facebook, user.social.facebook.as_deref());
                mini_changed |=
                    merge_field(&mut mini.social.linkedin, user.social.linkedin.as_deref());
                mini_changed |=
                    merge_field(&mut mini.social.youtube, user.social.youtube.as_deref());
                mini_changed |=
                    merge_field(&mut mini.social.website, user.social.website.as_deref());

                if mini_changed {
                    mini.updated_at = Utc::now();
                    if let Err(e) = self.ctx.mini_app_repo().update(&mini).await {
                        warn!(error = %e, "mini-app profile sync failed");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "mini-app profile lookup failed"),
        }

        if user_changed {
            user.updated_at = Utc::now();
        }
        // The caller may have mutated the user before propagation; persist
        // unconditionally so identity fields written earlier always land.
        self.ctx.user_repo().update(user).await?;
        Ok(())
    }

    /// Attach all unlinked statistics rows of a Mini-App user to a
    /// canonical user.
    ///
    /// Each attach commits on its own; one bad row never rolls back the
    /// rest.
    #[instrument(skip(self))]
    pub async fn merge_statistics(&self, mini_app_user_id: i64, user_id: i64) -> MergeReport {
        let rows = match self
            .ctx
            .statistics_repo()
            .unlinked_for_mini_app(mini_app_user_id)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "statistics listing failed");
                return MergeReport::default();
            }
        };

        let mut report = MergeReport::default();
        for row in rows {
            match self.ctx.statistics_repo().attach_to_user(row.id, user_id).await {
                Ok(()) => report.attached += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(stat_id = row.id, error = %e, "statistics attach failed");
                }
            }
        }
        report
    }
}

/// Fill `target` from `source` only when `target` is empty.
///
/// The pull direction of propagation: the canonical user only absorbs
/// Mini-App values into gaps, it never lets them overwrite existing data.
fn fill_if_empty(target: &mut Option<String>, source: Option<&str>) -> bool {
    match target.as_deref().map(str::trim) {
        Some(existing) if !existing.is_empty() => false,
        _ => merge_field(target, source),
    }
}
