//! PostgreSQL implementation of StatisticsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quizhub_core::entities::TaskStatistic;
use quizhub_core::traits::{RepoResult, StatisticsRepository};

use crate::models::TaskStatisticModel;

use super::error::map_db_error;

/// PostgreSQL implementation of StatisticsRepository
#[derive(Clone)]
pub struct PgStatisticsRepository {
    pool: PgPool,
}

impl PgStatisticsRepository {
    /// Create a new PgStatisticsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatisticsRepository for PgStatisticsRepository {
    #[instrument(skip(self))]
    async fn unlinked_for_mini_app(
        &self,
        mini_app_user_id: i64,
    ) -> RepoResult<Vec<TaskStatistic>> {
        let rows = sqlx::query_as::<_, TaskStatisticModel>(
            r"
            SELECT id, task_id, mini_app_user_id, site_user_id, score, created_at
            FROM task_statistics
            WHERE mini_app_user_id = $1 AND site_user_id IS NULL
            ORDER BY id
            ",
        )
        .bind(mini_app_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(TaskStatistic::from).collect())
    }

    // Each attach commits independently so one bad row never rolls back
    // the rest of a merge.
    #[instrument(skip(self))]
    async fn attach_to_user(&self, stat_id: i64, user_id: i64) -> RepoResult<()> {
        sqlx::query(
            "UPDATE task_statistics SET site_user_id = $2 WHERE id = $1 AND site_user_id IS NULL",
        )
        .bind(stat_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
