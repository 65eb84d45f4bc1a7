//! PostgreSQL implementation of LoginSessionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::SocialLoginSession;
use quizhub_core::traits::{LoginSessionRepository, RepoResult};

use super::error::map_db_error;

/// PostgreSQL implementation of LoginSessionRepository
#[derive(Clone)]
pub struct PgLoginSessionRepository {
    pool: PgPool,
}

impl PgLoginSessionRepository {
    /// Create a new PgLoginSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoginSessionRepository for PgLoginSessionRepository {
    #[instrument(skip(self, session), fields(social_account_id = session.social_account_id))]
    async fn create(&self, session: &SocialLoginSession) -> RepoResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO social_login_sessions (
                session_id, social_account_id, ip, user_agent, is_successful,
                error_message, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id
            ",
        )
        .bind(&session.session_id)
        .bind(session.social_account_id)
        .bind(&session.ip)
        .bind(&session.user_agent)
        .bind(session.is_successful)
        .bind(&session.error_message)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }
}
