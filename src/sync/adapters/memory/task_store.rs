//! In-memory issue task store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::issue::domain::{LocalTask, RefreshResult, TaskId};
use crate::sync::ports::{IssueTaskStore, SyncPortResult};

/// Thread-safe in-memory task store.
///
/// Tasks keep their insertion order so refresh batches are reproducible.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueTaskStore {
    state: Arc<RwLock<TaskState>>,
}

#[derive(Debug, Default)]
struct TaskState {
    order: Vec<TaskId>,
    tasks: HashMap<TaskId, LocalTask>,
}

impl InMemoryIssueTaskStore {
    /// Creates a store holding `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = LocalTask>) -> Self {
        let store = Self::default();
        for task in tasks {
            store.upsert(task);
        }
        store
    }

    /// Inserts or replaces a task.
    pub fn upsert(&self, task: LocalTask) {
        if let Ok(mut state) = self.state.write() {
            if !state.tasks.contains_key(&task.id()) {
                state.order.push(task.id());
            }
            state.tasks.insert(task.id(), task);
        }
    }

    /// Returns one task.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<LocalTask> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.tasks.get(&id).cloned())
    }
}

#[async_trait]
impl IssueTaskStore for InMemoryIssueTaskStore {
    async fn linked_tasks(&self) -> SyncPortResult<Vec<LocalTask>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| task.issue_link().is_some())
            .cloned()
            .collect())
    }

    async fn apply_refresh(&self, results: &[RefreshResult]) -> SyncPortResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let mut updated = 0_usize;
        for result in results {
            let Some(current) = state.tasks.get_mut(&result.task.id()) else {
                continue;
            };
            *current = current.apply_changes(&result.task_changes);
            updated = updated.saturating_add(1);
        }
        Ok(updated)
    }
}
