//! Mini-App user entity <-> model mapper

use quizhub_core::entities::MiniAppUser;
use quizhub_core::value_objects::TelegramId;

use crate::models::MiniAppUserModel;

use super::links_from_columns;

impl From<MiniAppUserModel> for MiniAppUser {
    fn from(model: MiniAppUserModel) -> Self {
        MiniAppUser {
            id: model.id,
            telegram_id: TelegramId::new(model.telegram_id),
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            grade: model.grade,
            language_tags: model.language_tags,
            gender: model.gender,
            birth_date: model.birth_date,
            is_private: model.is_private,
            notifications_enabled: model.notifications_enabled,
            avatar_1: model.avatar_1,
            avatar_2: model.avatar_2,
            avatar_3: model.avatar_3,
            social: links_from_columns(
                model.telegram_link,
                model.github_link,
                model.instagram_link,
                model.facebook_link,
                model.linkedin_link,
                model.youtube_link,
                model.website,
            ),
            chat_user_id: model.chat_user_id,
            admin_id: model.admin_id,
            site_admin_id: model.site_admin_id,
            site_user_id: model.site_user_id,
            last_seen: model.last_seen,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
