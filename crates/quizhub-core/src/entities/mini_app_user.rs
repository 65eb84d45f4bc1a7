//! Mini-App user entity - the rich in-Telegram profile representation

use chrono::{DateTime, NaiveDate, Utc};

use super::SocialLinks;
use crate::value_objects::TelegramId;

/// A Mini-App identity with a richer profile than the chat user.
///
/// Optionally back-linked to the chat user, Telegram admin, site admin,
/// and canonical user representations of the same person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniAppUser {
    pub id: i64,
    pub telegram_id: TelegramId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub grade: Option<i16>,
    /// Programming-language tags (many-to-many in storage)
    pub language_tags: Vec<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_private: bool,
    pub notifications_enabled: bool,
    /// Up to three avatar image slots
    pub avatar_1: Option<String>,
    pub avatar_2: Option<String>,
    pub avatar_3: Option<String>,
    pub social: SocialLinks,
    pub chat_user_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub site_admin_id: Option<i64>,
    pub site_user_id: Option<i64>,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MiniAppUser {
    pub fn new(telegram_id: TelegramId) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            telegram_id,
            username: None,
            first_name: None,
            last_name: None,
            bio: None,
            grade: None,
            language_tags: Vec::new(),
            gender: None,
            birth_date: None,
            is_private: false,
            notifications_enabled: true,
            avatar_1: None,
            avatar_2: None,
            avatar_3: None,
            social: SocialLinks::default(),
            chat_user_id: None,
            admin_id: None,
            site_admin_id: None,
            site_user_id: None,
            last_seen: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this profile is linked to a canonical user
    #[inline]
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.site_user_id.is_some()
    }

    pub fn touch_last_seen(&mut self) {
        self.last_seen = Utc::now();
    }
}
