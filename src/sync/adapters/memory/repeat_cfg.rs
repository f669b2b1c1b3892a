//! In-memory repeat configuration repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::sync::{
    domain::{RepeatCfgId, TaskRepeatCfg},
    ports::{SyncPortError, SyncPortResult, TaskRepeatCfgRepository},
};

/// Thread-safe in-memory repeat configuration repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepeatCfgRepository {
    state: Arc<RwLock<BTreeMap<RepeatCfgId, TaskRepeatCfg>>>,
}

impl InMemoryTaskRepeatCfgRepository {
    /// Creates a repository holding `cfgs`.
    #[must_use]
    pub fn with_cfgs(cfgs: impl IntoIterator<Item = TaskRepeatCfg>) -> Self {
        let repository = Self::default();
        repository.load(cfgs);
        repository
    }

    /// Replaces every configuration in one step, as a reload does.
    pub fn load(&self, cfgs: impl IntoIterator<Item = TaskRepeatCfg>) {
        let replacement: BTreeMap<RepeatCfgId, TaskRepeatCfg> =
            cfgs.into_iter().map(|cfg| (cfg.id().clone(), cfg)).collect();
        if let Ok(mut state) = self.state.write() {
            *state = replacement;
        }
    }

    /// Returns one configuration.
    #[must_use]
    pub fn get(&self, id: &RepeatCfgId) -> Option<TaskRepeatCfg> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.get(id).cloned())
    }
}

#[async_trait]
impl TaskRepeatCfgRepository for InMemoryTaskRepeatCfgRepository {
    async fn list_all(&self) -> SyncPortResult<Vec<TaskRepeatCfg>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.values().cloned().collect())
    }

    async fn record_task_creation(&self, id: &RepeatCfgId, day: NaiveDate) -> SyncPortResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let cfg = state
            .get_mut(id)
            .ok_or_else(|| SyncPortError::RepeatCfgNotFound(id.to_string()))?;
        *cfg = cfg.clone().with_last_task_creation(day);
        Ok(())
    }
}
