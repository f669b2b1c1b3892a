//! Port contracts for the stores the sync consumers read and write.

mod planner;
mod repeat_cfg;
mod task_store;

pub use planner::DueTaskPlanner;
pub use repeat_cfg::TaskRepeatCfgRepository;
pub use task_store::IssueTaskStore;

use std::sync::Arc;
use thiserror::Error;

/// Result type for sync port operations.
pub type SyncPortResult<T> = Result<T, SyncPortError>;

/// Errors returned by sync port implementations.
#[derive(Debug, Clone, Error)]
pub enum SyncPortError {
    /// The addressed repeat configuration does not exist.
    #[error("repeat configuration not found: {0}")]
    RepeatCfgNotFound(String),

    /// Persistence-layer failure.
    #[error("store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SyncPortError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
