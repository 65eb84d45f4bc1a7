//! Channel subscription entity

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::SubscriptionState;

/// A canonical user's membership in a channel.
///
/// `banned_until` is meaningful only while the state is `banned`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSubscription {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub state: SubscriptionState,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub banned_at: Option<DateTime<Utc>>,
    pub banned_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChannelSubscription {
    pub fn new(user_id: i64, channel_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            channel_id,
            state: SubscriptionState::Active,
            subscribed_at: now,
            unsubscribed_at: None,
            banned_at: None,
            banned_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition to a new state, enforcing the allowed DAG and keeping the
    /// state timestamps consistent.
    pub fn transition(
        &mut self,
        to: SubscriptionState,
        banned_until: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        if !self.state.can_transition_to(to) {
            return Err(DomainError::InvalidStateTransition {
                from: self.state,
                to,
            });
        }

        let now = Utc::now();
        match to {
            SubscriptionState::Active => {
                self.banned_until = None;
            }
            SubscriptionState::Inactive => {
                self.unsubscribed_at = Some(now);
                self.banned_until = None;
            }
            SubscriptionState::Banned => {
                self.banned_at = Some(now);
                self.banned_until = banned_until;
            }
        }
        self.state = to;
        self.updated_at = now;
        Ok(())
    }
}
