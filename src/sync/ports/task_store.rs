//! Task store port used by the issue poller.

use super::SyncPortResult;
use crate::issue::domain::{LocalTask, RefreshResult};
use async_trait::async_trait;

/// Read and patch access to tasks linked to remote issues.
#[async_trait]
pub trait IssueTaskStore: Send + Sync {
    /// Lists tasks that carry an issue link.
    async fn linked_tasks(&self) -> SyncPortResult<Vec<LocalTask>>;

    /// Applies the patches of a refresh; returns how many tasks changed.
    async fn apply_refresh(&self, results: &[RefreshResult]) -> SyncPortResult<usize>;
}
