//! Canonical user entity <-> model mapper

use quizhub_core::entities::CanonicalUser;
use quizhub_core::value_objects::TelegramId;

use crate::models::UserModel;

use super::links_from_columns;

impl From<UserModel> for CanonicalUser {
    fn from(model: UserModel) -> Self {
        CanonicalUser {
            id: model.id,
            username: model.username,
            email: model.email,
            telegram_id: model.telegram_id.map(TelegramId::new),
            first_name: model.first_name,
            last_name: model.last_name,
            avatar: model.avatar,
            avatar_url: model.avatar_url,
            social: links_from_columns(
                model.telegram_link,
                model.github_link,
                model.instagram_link,
                model.facebook_link,
                model.linkedin_link,
                model.youtube_link,
                model.website,
            ),
            language: model.language,
            is_active: model.is_active,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            is_telegram_user: model.is_telegram_user,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
