//! Task statistic entity - the minimum the identity merge needs

use chrono::{DateTime, Utc};

/// One quiz-task result row, linkable to a Mini-App user and/or a
/// canonical user. Identity merging attaches unlinked rows to the
/// canonical user; the statistics math itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatistic {
    pub id: i64,
    pub task_id: i64,
    pub mini_app_user_id: Option<i64>,
    pub site_user_id: Option<i64>,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}
