//! Task statistic entity <-> model mapper

use quizhub_core::entities::TaskStatistic;

use crate::models::TaskStatisticModel;

impl From<TaskStatisticModel> for TaskStatistic {
    fn from(model: TaskStatisticModel) -> Self {
        TaskStatistic {
            id: model.id,
            task_id: model.task_id,
            mini_app_user_id: model.mini_app_user_id,
            site_user_id: model.site_user_id,
            score: model.score,
            created_at: model.created_at,
        }
    }
}
