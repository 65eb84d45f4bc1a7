//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::CanonicalUser;
use quizhub_core::error::DomainError;
use quizhub_core::traits::{RepoResult, UserRepository};
use quizhub_core::value_objects::TelegramId;

use crate::mappers::SocialLinkColumns;
use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = r"
    id, username, email, telegram_id, first_name, last_name, avatar, avatar_url,
    telegram_link, github_link, instagram_link, facebook_link, linkedin_link,
    youtube_link, website, language, is_active, is_staff, is_superuser,
    is_telegram_user, created_at, updated_at
";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CanonicalUser>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CanonicalUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<CanonicalUser>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE telegram_id = $1"
        ))
        .bind(telegram_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CanonicalUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<CanonicalUser>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND email <> ''"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CanonicalUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_social_email(&self, email: &str) -> RepoResult<Option<CanonicalUser>> {
        // A user matched through a social-account email is eligible only
        // while no Telegram social account is attached yet.
        let result = sqlx::query_as::<_, UserModel>(&format!(
            r"
            SELECT {USER_COLUMNS} FROM users u
            WHERE EXISTS (
                SELECT 1 FROM social_accounts sa
                WHERE sa.user_id = u.id AND sa.email = $1 AND sa.email <> ''
            )
            AND NOT EXISTS (
                SELECT 1 FROM social_accounts t
                WHERE t.user_id = u.id AND t.provider = 'telegram'
            )
            ORDER BY u.id
            LIMIT 1
            "
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CanonicalUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username_ci(&self, username: &str) -> RepoResult<Option<CanonicalUser>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(username) = LOWER($1)"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CanonicalUser::from))
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &CanonicalUser) -> RepoResult<i64> {
        let links = SocialLinkColumns::new(&user.social);
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO users (
                username, email, telegram_id, first_name, last_name, avatar, avatar_url,
                telegram_link, github_link, instagram_link, facebook_link, linkedin_link,
                youtube_link, website, language, is_active, is_staff, is_superuser,
                is_telegram_user, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, NOW(), NOW())
            RETURNING id
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.telegram_id.map(TelegramId::into_inner))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.avatar)
        .bind(&user.avatar_url)
        .bind(links.telegram)
        .bind(links.github)
        .bind(links.instagram)
        .bind(links.facebook)
        .bind(links.linkedin)
        .bind(links.youtube)
        .bind(links.website)
        .bind(&user.language)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .bind(user.is_telegram_user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameTaken))?;

        Ok(id)
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn update(&self, user: &CanonicalUser) -> RepoResult<()> {
        let links = SocialLinkColumns::new(&user.social);
        let result = sqlx::query(
            r"
            UPDATE users
            SET username = $2, email = $3, telegram_id = $4, first_name = $5,
                last_name = $6, avatar = $7, avatar_url = $8, telegram_link = $9,
                github_link = $10, instagram_link = $11, facebook_link = $12,
                linkedin_link = $13, youtube_link = $14, website = $15, language = $16,
                is_active = $17, is_staff = $18, is_superuser = $19,
                is_telegram_user = $20, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.telegram_id.map(TelegramId::into_inner))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.avatar)
        .bind(&user.avatar_url)
        .bind(links.telegram)
        .bind(links.github)
        .bind(links.instagram)
        .bind(links.facebook)
        .bind(links.linkedin)
        .bind(links.youtube)
        .bind(links.website)
        .bind(&user.language)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .bind(user.is_telegram_user)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TelegramIdAlreadyLinked))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }
}
