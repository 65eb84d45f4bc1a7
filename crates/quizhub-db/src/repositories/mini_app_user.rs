//! PostgreSQL implementation of MiniAppUserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::MiniAppUser;
use quizhub_core::error::DomainError;
use quizhub_core::traits::{MiniAppUserRepository, RepoResult};
use quizhub_core::value_objects::TelegramId;

use crate::mappers::SocialLinkColumns;
use crate::models::MiniAppUserModel;

use super::error::map_db_error;

// language_tags is aggregated from the join table so one query returns
// the full profile.
const MINI_APP_SELECT: &str = r"
    SELECT m.id, m.telegram_id, m.username, m.first_name, m.last_name, m.bio,
           m.grade,
           COALESCE(
               ARRAY(
                   SELECT l.tag FROM mini_app_user_languages l
                   WHERE l.mini_app_user_id = m.id
                   ORDER BY l.tag
               ),
               '{}'
           ) AS language_tags,
           m.gender, m.birth_date, m.is_private, m.notifications_enabled,
           m.avatar_1, m.avatar_2, m.avatar_3,
           m.telegram_link, m.github_link, m.instagram_link, m.facebook_link,
           m.linkedin_link, m.youtube_link, m.website,
           m.chat_user_id, m.admin_id, m.site_admin_id, m.site_user_id,
           m.last_seen, m.created_at, m.updated_at
    FROM mini_app_users m
";

/// PostgreSQL implementation of MiniAppUserRepository
#[derive(Clone)]
pub struct PgMiniAppUserRepository {
    pool: PgPool,
}

impl PgMiniAppUserRepository {
    /// Create a new PgMiniAppUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MiniAppUserRepository for PgMiniAppUserRepository {
    #[instrument(skip(self))]
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<MiniAppUser>> {
        let result = sqlx::query_as::<_, MiniAppUserModel>(&format!(
            "{MINI_APP_SELECT} WHERE m.telegram_id = $1"
        ))
        .bind(telegram_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MiniAppUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_site_user(&self, site_user_id: i64) -> RepoResult<Option<MiniAppUser>> {
        let result = sqlx::query_as::<_, MiniAppUserModel>(&format!(
            "{MINI_APP_SELECT} WHERE m.site_user_id = $1"
        ))
        .bind(site_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MiniAppUser::from))
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn update(&self, user: &MiniAppUser) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let links = SocialLinkColumns::new(&user.social);
        let result = sqlx::query(
            r"
            UPDATE mini_app_users
            SET username = $2, first_name = $3, last_name = $4, bio = $5, grade = $6,
                gender = $7, birth_date = $8, is_private = $9,
                notifications_enabled = $10, avatar_1 = $11, avatar_2 = $12,
                avatar_3 = $13, telegram_link = $14, github_link = $15,
                instagram_link = $16, facebook_link = $17, linkedin_link = $18,
                youtube_link = $19, website = $20, chat_user_id = $21, admin_id = $22,
                site_admin_id = $23, site_user_id = $24, last_seen = $25,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.bio)
        .bind(user.grade)
        .bind(&user.gender)
        .bind(user.birth_date)
        .bind(user.is_private)
        .bind(user.notifications_enabled)
        .bind(&user.avatar_1)
        .bind(&user.avatar_2)
        .bind(&user.avatar_3)
        .bind(links.telegram)
        .bind(links.github)
        .bind(links.instagram)
        .bind(links.facebook)
        .bind(links.linkedin)
        .bind(links.youtube)
        .bind(links.website)
        .bind(user.chat_user_id)
        .bind(user.admin_id)
        .bind(user.site_admin_id)
        .bind(user.site_user_id)
        .bind(user.last_seen)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MiniAppUserNotFound(user.telegram_id));
        }

        // Replace the language tag set
        sqlx::query("DELETE FROM mini_app_user_languages WHERE mini_app_user_id = $1")
            .bind(user.id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        for tag in &user.language_tags {
            sqlx::query(
                "INSERT INTO mini_app_user_languages (mini_app_user_id, tag) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(user.id)
            .bind(tag)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
