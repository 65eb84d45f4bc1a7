//! Telegram chat user entity - a person as seen by the bot inside chats

use chrono::{DateTime, Utc};

use crate::value_objects::TelegramId;

/// A Telegram identity observed by the bot in chats.
///
/// Owns the user's channel subscriptions; optionally back-linked to the
/// canonical user once the identities are reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramChatUser {
    pub id: i64,
    pub telegram_id: TelegramId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub is_premium: bool,
    pub site_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TelegramChatUser {
    pub fn new(telegram_id: TelegramId) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            telegram_id,
            username: None,
            first_name: None,
            last_name: None,
            language_code: None,
            is_premium: false,
            site_user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this chat user is already linked to a canonical user
    #[inline]
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.site_user_id.is_some()
    }
}
