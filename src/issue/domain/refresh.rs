//! Results handed back to the task store and the UI.

use super::{IssueProviderKind, LocalTask, RemoteItem, TaskChanges};
use serde::{Deserialize, Serialize};

/// Outcome of refreshing one task whose remote issue changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUpdate {
    /// Patch the task store applies.
    pub task_changes: TaskChanges,
    /// Remote representation the patch was built from.
    pub issue: RemoteItem,
    /// Short display title for notifications.
    pub issue_title: String,
}

/// One stale task found by a batch refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResult {
    /// Task as it was when the refresh started.
    pub task: LocalTask,
    /// Patch the task store applies.
    pub task_changes: TaskChanges,
    /// Remote representation the patch was built from.
    pub issue: RemoteItem,
    /// Short display title for notifications.
    pub issue_title: String,
}

impl RefreshResult {
    /// Pairs a single-task update with its task.
    #[must_use]
    pub fn from_update(task: LocalTask, update: IssueUpdate) -> Self {
        Self {
            task,
            task_changes: update.task_changes,
            issue: update.issue,
            issue_title: update.issue_title,
        }
    }

    /// Drops the task, keeping the single-task shape.
    #[must_use]
    pub fn into_update(self) -> IssueUpdate {
        IssueUpdate {
            task_changes: self.task_changes,
            issue: self.issue,
            issue_title: self.issue_title,
        }
    }
}

/// Uniform search hit returned by every backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    /// Display title.
    pub title: String,
    /// Backend kind that produced the hit.
    pub issue_type: IssueProviderKind,
    /// Remote representation.
    pub issue_data: RemoteItem,
}
