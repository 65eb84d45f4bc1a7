//! Channel subscription entity <-> model mapper

use quizhub_core::entities::ChannelSubscription;
use quizhub_core::error::DomainError;
use quizhub_core::traits::RepoResult;
use quizhub_core::value_objects::SubscriptionState;

use crate::models::SubscriptionModel;

/// Convert a row to the entity; fails on an unknown state string.
pub fn subscription_from_model(model: SubscriptionModel) -> RepoResult<ChannelSubscription> {
    let state = SubscriptionState::parse(&model.state).ok_or_else(|| {
        DomainError::DatabaseError(format!("unknown subscription state in row {}: {}", model.id, model.state))
    })?;

    Ok(ChannelSubscription {
        id: model.id,
        user_id: model.user_id,
        channel_id: model.channel_id,
        state,
        subscribed_at: model.subscribed_at,
        unsubscribed_at: model.unsubscribed_at,
        banned_at: model.banned_at,
        banned_until: model.banned_until,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
