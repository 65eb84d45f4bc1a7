//! Notification entity - a message delivered (or due) to a telegram user

use chrono::{DateTime, Utc};

use crate::value_objects::TelegramId;

/// Persisted record of an HTML message delivered, or due to be delivered,
/// to a recipient telegram id. The admin-broadcast variant has no single
/// recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    /// `None` for admin broadcasts
    pub recipient: Option<TelegramId>,
    pub body_html: String,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn to_user(recipient: TelegramId, body_html: impl Into<String>) -> Self {
        Self {
            id: 0,
            recipient: Some(recipient),
            body_html: body_html.into(),
            delivered_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn broadcast(body_html: impl Into<String>) -> Self {
        Self {
            id: 0,
            recipient: None,
            body_html: body_html.into(),
            delivered_at: None,
            created_at: Utc::now(),
        }
    }
}
