//! Channel subscription state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership state of a canonical user in a Telegram channel.
///
/// Transitions form a DAG:
/// `active -> inactive`, `active -> banned`, `banned -> active`, `banned -> inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionState {
    Active,
    Inactive,
    Banned,
}

impl SubscriptionState {
    /// Stable string form used in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Banned => "banned",
        }
    }

    /// Parse from the stable string form
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "banned" => Some(Self::Banned),
            _ => None,
        }
    }

    /// Whether the transition `self -> to` is allowed
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Active, Self::Inactive)
                | (Self::Active, Self::Banned)
                | (Self::Banned, Self::Active)
                | (Self::Banned, Self::Inactive)
        )
    }
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
