//! OAuth reconciler shared by GitHub and Google
//!
//! The provider specifics live behind [`OAuthClient`]; this service owns
//! the state check, the identity match order, and the audit trail.
//!
//! Match order for a fresh account: already-logged-in user, provider
//! email, case-insensitive username. The username match is adopted only
//! when the matched user's email is empty or equals the provider email;
//! otherwise a new user is created rather than silently merging two
//! people.

use tracing::{info, instrument};
use validator::Validate;

use quizhub_common::auth::validate_state;
use quizhub_core::entities::CanonicalUser;
use quizhub_core::value_objects::merge_field;
use quizhub_core::DomainError;

use crate::dto::{LoginMeta, LoginOutcome, OAuthCallbackRequest};
use crate::oauth::{OAuthClient, ProviderProfile};

use super::audit;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::{IdentityService, LookupKeys};
use super::username;

/// Code-flow login service for one OAuth provider
pub struct OAuthLoginService<'a> {
    ctx: &'a ServiceContext,
    client: &'a dyn OAuthClient,
}

impl<'a> OAuthLoginService<'a> {
    pub fn new(ctx: &'a ServiceContext, client: &'a dyn OAuthClient) -> Self {
        Self { ctx, client }
    }

    /// Complete an OAuth callback.
    ///
    /// `current_user` is the already-authenticated user when the flow is
    /// an account attach rather than a login.
    #[instrument(skip_all)]
    pub async fn login(
        &self,
        request: &OAuthCallbackRequest,
        current_user: Option<&CanonicalUser>,
        meta: LoginMeta,
    ) -> ServiceResult<LoginOutcome> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        validate_state(&request.expected_state, &request.state)?;

        let token = self.client.exchange_code(&request.code).await?;
        let profile = self.client.fetch_profile(&token).await?;

        let identity = IdentityService::new(self.ctx);
        let existing_account = self
            .ctx
            .social_account_repo()
            .find_by_provider_user(profile.provider, &profile.provider_user_id)
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
            None => match current_user {
                Some(user) => (user.clone(), false),
                None => self.match_or_create(&identity, &profile).await?,
            },
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

        // Provider data fills gaps only
        if is_blank(user.email.as_deref()) {
            user.email.clone_from(&profile.email);
        }
        merge_field(&mut user.first_name, profile.first_name.as_deref());
        merge_field(&mut user.last_name, profile.last_name.as_deref());
        if !user.has_avatar() {
            user.avatar_url.clone_from(&profile.avatar_url);
        }

        let account = identity.link(&user, &profile).await?;
        identity.propagate_profile(&mut user).await?;

        let session_id = audit::record_success(self.ctx, account.id, &meta).await;
        info!(
            user_id = user.id,
            provider = %profile.provider,
            is_new_user,
            "oauth login completed"
        );

        Ok(LoginOutcome {
            user,
            social_account: account,
            is_new_user,
            session_id,
        })
    }

    async fn match_or_create(
        &self,
        identity: &IdentityService<'_>,
        profile: &ProviderProfile,
    ) -> ServiceResult<(CanonicalUser, bool)> {
        if let Some(email) = profile.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            let keys = LookupKeys {
                email: Some(email),
                ..LookupKeys::default()
            };
            if let Some(found) = identity.find_canonical(keys).await? {
                return Ok((found.user, false));
            }
        }

        if let Some(login) = profile.username.as_deref() {
            if let Some(user) = self.ctx.user_repo().find_by_username_ci(login).await? {
                if emails_compatible(user.email.as_deref(), profile.email.as_deref()) {
                    return Ok((user, false));
                }
            }
        }

        let candidates = username::oauth_candidates(
            profile.provider,
            profile.username.as_deref(),
            profile.first_name.as_deref(),
            profile.last_name.as_deref(),
            profile.email.as_deref(),
            &profile.provider_user_id,
        );
        let name = username::resolve_unique(self.ctx.user_repo(), &candidates).await?;

        let mut user = CanonicalUser::new(name);
        user.email.clone_from(&profile.email);
        user.first_name.clone_from(&profile.first_name);
        user.last_name.clone_from(&profile.last_name);
        user.avatar_url.clone_from(&profile.avatar_url);
        user.id = self.ctx.user_repo().create(&user).await?;

        info!(
            user_id = user.id,
            username = %user.username,
            provider = %profile.provider,
            "canonical user created from oauth profile"
        );
        Ok((user, true))
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Username-match guard: the matched user's email must be empty or equal
/// the provider email.
fn emails_compatible(user_email: Option<&str>, provider_email: Option<&str>) -> bool {
    match user_email.map(str::trim).filter(|e| !e.is_empty()) {
        None => true,
        Some(existing) => provider_email
            .map(str::trim)
            .is_some_and(|p| p.eq_ignore_ascii_case(existing)),
    }
}
