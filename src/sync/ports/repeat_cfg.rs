//! Repeat configuration repository port.

use super::SyncPortResult;
use crate::sync::domain::{RepeatCfgId, TaskRepeatCfg};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Access to the repeat configurations held in local state.
///
/// The reload process replaces these wholesale; readers must only call the
/// repository while no reload is in progress.
#[async_trait]
pub trait TaskRepeatCfgRepository: Send + Sync {
    /// Lists every repeat configuration.
    async fn list_all(&self) -> SyncPortResult<Vec<TaskRepeatCfg>>;

    /// Records that a task was created for `id` on `day`.
    ///
    /// # Errors
    ///
    /// Returns [`super::SyncPortError::RepeatCfgNotFound`] for unknown
    /// configurations.
    async fn record_task_creation(&self, id: &RepeatCfgId, day: NaiveDate) -> SyncPortResult<()>;
}
