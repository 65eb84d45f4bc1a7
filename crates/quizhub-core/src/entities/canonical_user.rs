//! Canonical user entity - the single record for a real person on the platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::TelegramId;

/// Social profile URLs carried by a canonical user (and mirrored by the
/// Mini-App representation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub telegram: Option<String>,
    pub github: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
    pub website: Option<String>,
}

impl SocialLinks {
    /// True if every link is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.telegram.is_none()
            && self.github.is_none()
            && self.instagram.is_none()
            && self.facebook.is_none()
            && self.linkedin.is_none()
            && self.youtube.is_none()
            && self.website.is_none()
    }
}

/// The single platform-wide person record.
///
/// At most one canonical user exists per `telegram_id` and per non-empty
/// `email`; `username` is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalUser {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub telegram_id: Option<TelegramId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Path to an explicitly uploaded avatar file; never overwritten by a
    /// remote photo URL.
    pub avatar: Option<String>,
    /// Remote avatar URL (e.g. Telegram photo); used only while no uploaded
    /// avatar exists.
    pub avatar_url: Option<String>,
    pub social: SocialLinks,
    pub language: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_telegram_user: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CanonicalUser {
    /// Create a new active user with required fields; `id` is assigned by
    /// the repository on insert.
    pub fn new(username: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username,
            email: None,
            telegram_id: None,
            first_name: None,
            last_name: None,
            avatar: None,
            avatar_url: None,
            social: SocialLinks::default(),
            language: None,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            is_telegram_user: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display name: "First Last", falling back to the username
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{f} {l}"),
            (Some(f), None) => f.clone(),
            _ => self.username.clone(),
        }
    }

    /// Whether a SiteAdmin projection must exist for this user
    #[inline]
    #[must_use]
    pub fn is_site_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    /// Whether the user currently has any avatar (uploaded or remote)
    #[inline]
    #[must_use]
    pub fn has_avatar(&self) -> bool {
        self.avatar.is_some() || self.avatar_url.is_some()
    }

    /// Deactivate the account. Users are never deleted.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
