//! Task planning port used by the due-task consumer.

use super::SyncPortResult;
use crate::issue::domain::TaskId;
use crate::sync::domain::TaskRepeatCfg;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Creates tasks in the external task store.
#[async_trait]
pub trait DueTaskPlanner: Send + Sync {
    /// Creates the task instance of `cfg` for `day`.
    async fn create_repeatable_task(
        &self,
        cfg: &TaskRepeatCfg,
        day: NaiveDate,
    ) -> SyncPortResult<TaskId>;

    /// Moves every task due on `day` into today's list; returns how many
    /// were added.
    async fn add_all_due_today(&self, day: NaiveDate) -> SyncPortResult<usize>;
}
