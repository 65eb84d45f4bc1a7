//! Social account entity - an external identity attached to a canonical user

use chrono::{DateTime, Utc};

use crate::value_objects::{Provider, TelegramId};

/// An external provider identity attached to a canonical user.
///
/// Unique on `(provider, provider_user_id)`; at most one account per
/// provider per user is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialAccount {
    pub id: i64,
    pub user_id: i64,
    pub provider: Provider,
    pub provider_user_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SocialAccount {
    pub fn new(user_id: i64, provider: Provider, provider_user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            provider,
            provider_user_id,
            username: None,
            email: None,
            first_name: None,
            last_name: None,
            avatar_url: None,
            access_token: None,
            refresh_token: None,
            token_expires_at: None,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// GitHub profile URL derived from the account username.
    ///
    /// The `github` social link is always rebuilt from this, never from a
    /// provider email.
    #[must_use]
    pub fn github_profile_url(&self) -> Option<String> {
        if self.provider != Provider::Github {
            return None;
        }
        self.username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(|u| format!("https://github.com/{}", u.trim()))
    }

    /// Telegram profile URL derived from the account username
    #[must_use]
    pub fn telegram_profile_url(&self) -> Option<String> {
        if self.provider != Provider::Telegram {
            return None;
        }
        self.username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(|u| format!("https://t.me/{}", u.trim()))
    }

    /// Telegram user id carried by a Telegram account
    #[must_use]
    pub fn telegram_id(&self) -> Option<TelegramId> {
        if self.provider != Provider::Telegram {
            return None;
        }
        self.provider_user_id.parse::<i64>().ok().map(TelegramId::new)
    }

    pub fn touch_last_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}
