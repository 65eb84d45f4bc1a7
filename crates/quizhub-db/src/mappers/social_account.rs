//! Social account entity <-> model mapper

use quizhub_core::entities::SocialAccount;
use quizhub_core::error::DomainError;
use quizhub_core::traits::RepoResult;
use quizhub_core::value_objects::Provider;

use crate::models::SocialAccountModel;

/// Convert a row to the entity; fails on an unknown provider string.
pub fn social_account_from_model(model: SocialAccountModel) -> RepoResult<SocialAccount> {
    let provider = Provider::parse(&model.provider).ok_or_else(|| {
        DomainError::DatabaseError(format!("unknown provider in row {}: {}", model.id, model.provider))
    })?;

    Ok(SocialAccount {
        id: model.id,
        user_id: model.user_id,
        provider,
        provider_user_id: model.provider_user_id,
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        avatar_url: model.avatar_url,
        access_token: model.access_token,
        refresh_token: model.refresh_token,
        token_expires_at: model.token_expires_at,
        is_active: model.is_active,
        last_login_at: model.last_login_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
