//! PostgreSQL implementation of ChatUserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::TelegramChatUser;
use quizhub_core::error::DomainError;
use quizhub_core::traits::{ChatUserRepository, RepoResult};
use quizhub_core::value_objects::TelegramId;

use crate::models::ChatUserModel;

use super::error::map_db_error;

const CHAT_USER_COLUMNS: &str = r"
    id, telegram_id, username, first_name, last_name, language_code, is_premium,
    site_user_id, created_at, updated_at
";

/// PostgreSQL implementation of ChatUserRepository
#[derive(Clone)]
pub struct PgChatUserRepository {
    pool: PgPool,
}

impl PgChatUserRepository {
    /// Create a new PgChatUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatUserRepository for PgChatUserRepository {
    #[instrument(skip(self))]
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<TelegramChatUser>> {
        let result = sqlx::query_as::<_, ChatUserModel>(&format!(
            "SELECT {CHAT_USER_COLUMNS} FROM chat_users WHERE telegram_id = $1"
        ))
        .bind(telegram_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TelegramChatUser::from))
    }

    #[instrument(skip(self, user), fields(telegram_id = %user.telegram_id))]
    async fn upsert(&self, user: &TelegramChatUser) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO chat_users (
                telegram_id, username, first_name, last_name, language_code,
                is_premium, site_user_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            ON CONFLICT (telegram_id) DO UPDATE
            SET username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                language_code = EXCLUDED.language_code,
                is_premium = EXCLUDED.is_premium,
                site_user_id = COALESCE(EXCLUDED.site_user_id, chat_users.site_user_id),
                updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(user.telegram_id.into_inner())
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.language_code)
        .bind(user.is_premium)
        .bind(user.site_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn update(&self, user: &TelegramChatUser) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE chat_users
            SET username = $2, first_name = $3, last_name = $4, language_code = $5,
                is_premium = $6, site_user_id = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.language_code)
        .bind(user.is_premium)
        .bind(user.site_user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TelegramUserNotFound(user.telegram_id));
        }

        Ok(())
    }
}
