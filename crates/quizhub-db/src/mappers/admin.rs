//! Telegram admin entity <-> model mapper

use quizhub_core::entities::TelegramAdmin;
use quizhub_core::value_objects::TelegramId;

use crate::models::TelegramAdminModel;

impl From<TelegramAdminModel> for TelegramAdmin {
    fn from(model: TelegramAdminModel) -> Self {
        TelegramAdmin {
            id: model.id,
            telegram_id: TelegramId::new(model.telegram_id),
            username: model.username,
            is_active: model.is_active,
            photo_url: model.photo_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
