//! In-memory adapters for tests and embedding.

mod planner;
mod repeat_cfg;
mod task_store;

pub use planner::InMemoryDueTaskPlanner;
pub use repeat_cfg::InMemoryTaskRepeatCfgRepository;
pub use task_store::InMemoryIssueTaskStore;

use crate::sync::ports::SyncPortError;

fn lock_poisoned(err: impl std::fmt::Display) -> SyncPortError {
    SyncPortError::persistence(std::io::Error::other(err.to_string()))
}
