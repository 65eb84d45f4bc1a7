//! Telegram admin entity

use chrono::{DateTime, Utc};

use crate::value_objects::TelegramId;

/// A Telegram identity granted administrator capabilities in one or more
/// channels.
///
/// The admin-channel relation lives in the repository; a row here is
/// "real" only when remote channel membership confirms administrator
/// status, and the control plane reconciles the two on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramAdmin {
    pub id: i64,
    pub telegram_id: TelegramId,
    pub username: Option<String>,
    pub is_active: bool,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TelegramAdmin {
    pub fn new(telegram_id: TelegramId) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            telegram_id,
            username: None,
            is_active: true,
            photo_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
