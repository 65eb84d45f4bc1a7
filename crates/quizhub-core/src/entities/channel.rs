//! Telegram channel entity

use chrono::{DateTime, Utc};

/// A Telegram broadcast channel or supergroup known to the system, keyed
/// by its chat id (`group_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramChannel {
    pub id: i64,
    pub group_id: i64,
    pub title: String,
    /// Public `@username` without the leading `@`, when the channel has one
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TelegramChannel {
    pub fn new(group_id: i64, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            group_id,
            title,
            username: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Public `https://t.me/...` URL, when the channel has a public username
    #[must_use]
    pub fn public_url(&self) -> Option<String> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("https://t.me/{u}"))
    }
}
