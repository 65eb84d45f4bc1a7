//! Telegram chat user entity <-> model mapper

use quizhub_core::entities::TelegramChatUser;
use quizhub_core::value_objects::TelegramId;

use crate::models::ChatUserModel;

impl From<ChatUserModel> for TelegramChatUser {
    fn from(model: ChatUserModel) -> Self {
        TelegramChatUser {
            id: model.id,
            telegram_id: TelegramId::new(model.telegram_id),
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            language_code: model.language_code,
            is_premium: model.is_premium,
            site_user_id: model.site_user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
