//! Notification entity <-> model mapper

use quizhub_core::entities::Notification;
use quizhub_core::value_objects::TelegramId;

use crate::models::NotificationModel;

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: model.id,
            recipient: model.recipient_telegram_id.map(TelegramId::new),
            body_html: model.body_html,
            delivered_at: model.delivered_at,
            created_at: model.created_at,
        }
    }
}
