//! Task statistic database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the task_statistics table
#[derive(Debug, Clone, FromRow)]
pub struct TaskStatisticModel {
    pub id: i64,
    pub task_id: i64,
    pub mini_app_user_id: Option<i64>,
    pub site_user_id: Option<i64>,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}
