//! Telegram channel entity <-> model mapper

use quizhub_core::entities::TelegramChannel;

use crate::models::TelegramChannelModel;

impl From<TelegramChannelModel> for TelegramChannel {
    fn from(model: TelegramChannelModel) -> Self {
        TelegramChannel {
            id: model.id,
            group_id: model.group_id,
            title: model.title,
            username: model.username,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
