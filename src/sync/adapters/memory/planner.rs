//! In-memory task planner.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::issue::domain::TaskId;
use crate::sync::{
    domain::{RepeatCfgId, TaskRepeatCfg},
    ports::{DueTaskPlanner, SyncPortResult},
};

/// Records planned tasks instead of creating them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDueTaskPlanner {
    state: Arc<RwLock<PlannerState>>,
}

#[derive(Debug, Default)]
struct PlannerState {
    created: Vec<(RepeatCfgId, NaiveDate)>,
    due_today_runs: Vec<NaiveDate>,
}

impl InMemoryDueTaskPlanner {
    /// Creates an empty planner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every `(configuration, day)` a task was created for.
    #[must_use]
    pub fn created(&self) -> Vec<(RepeatCfgId, NaiveDate)> {
        self.state
            .read()
            .map(|state| state.created.clone())
            .unwrap_or_default()
    }

    /// Returns the days "add all due today" ran for.
    #[must_use]
    pub fn due_today_runs(&self) -> Vec<NaiveDate> {
        self.state
            .read()
            .map(|state| state.due_today_runs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DueTaskPlanner for InMemoryDueTaskPlanner {
    async fn create_repeatable_task(
        &self,
        cfg: &TaskRepeatCfg,
        day: NaiveDate,
    ) -> SyncPortResult<TaskId> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.created.push((cfg.id().clone(), day));
        Ok(TaskId::new())
    }

    async fn add_all_due_today(&self, day: NaiveDate) -> SyncPortResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.due_today_runs.push(day);
        let created_today = state
            .created
            .iter()
            .filter(|(_, created_day)| *created_day == day)
            .count();
        Ok(created_today)
    }
}
