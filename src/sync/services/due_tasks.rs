//! Repeatable task creation gated on reload completion.

use super::reload::{ReloadCoordinator, ReloadError};
use crate::sync::{
    domain::RepeatCfgId,
    ports::{DueTaskPlanner, SyncPortError, TaskRepeatCfgRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Errors raised by the due-task consumer.
#[derive(Debug, Clone, Error)]
pub enum DueTaskError {
    /// Reload observation failed.
    #[error(transparent)]
    Reload(#[from] ReloadError),
    /// A store or planner call failed.
    #[error(transparent)]
    Port(#[from] SyncPortError),
}

/// What one run of the consumer did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DueTaskReport {
    /// Configurations a task was created for.
    pub created: Vec<RepeatCfgId>,
    /// Tasks moved into today's list.
    pub added_due_today: usize,
    /// Reload generation the run read state from.
    pub generation: u64,
}

/// Creates repeatable tasks and adds due tasks to today.
///
/// The consumer never reads state while a reload is running: scheduled
/// runs are triggered by reload completions, and [`Self::run_once`] first
/// waits for any running reload to finish.
pub struct DueTaskConsumer<R, P, C>
where
    R: TaskRepeatCfgRepository,
    P: DueTaskPlanner,
    C: Clock + Send + Sync,
{
    repeat_cfgs: Arc<R>,
    planner: Arc<P>,
    clock: Arc<C>,
    reloads: ReloadCoordinator,
}

impl<R, P, C> DueTaskConsumer<R, P, C>
where
    R: TaskRepeatCfgRepository,
    P: DueTaskPlanner,
    C: Clock + Send + Sync,
{
    /// Creates a consumer bound to `reloads`.
    #[must_use]
    pub const fn new(
        repeat_cfgs: Arc<R>,
        planner: Arc<P>,
        clock: Arc<C>,
        reloads: ReloadCoordinator,
    ) -> Self {
        Self {
            repeat_cfgs,
            planner,
            clock,
            reloads,
        }
    }

    /// Runs once, after any running reload finished.
    ///
    /// # Errors
    ///
    /// Returns [`DueTaskError::Reload`] when the coordinator closed during
    /// the wait and [`DueTaskError::Port`] when a store call fails.
    pub async fn run_once(&self) -> Result<DueTaskReport, DueTaskError> {
        let state = self.reloads.watcher().wait_idle().await?;
        self.create_due_tasks(state.generation()).await
    }

    /// Runs after every reload completion until `shutdown` turns `true`.
    ///
    /// Port failures are logged and the loop waits for the next
    /// completion.
    ///
    /// # Errors
    ///
    /// Returns [`DueTaskError::Reload`] when the coordinator closed.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DueTaskError> {
        let mut watcher = self.reloads.watcher();
        loop {
            if *shutdown.borrow() {
                return Ok(());
            }
            tokio::select! {
                completion = watcher.next_completion() => {
                    let state = completion?;
                    match self.create_due_tasks(state.generation()).await {
                        Ok(report) => {
                            debug!(created = report.created.len(), "due-task run finished");
                        }
                        Err(err) => warn!(error = %err, "due-task run failed"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn create_due_tasks(&self, generation: u64) -> Result<DueTaskReport, DueTaskError> {
        let today = self.clock.local().date_naive();
        let cfgs = self.repeat_cfgs.list_all().await?;
        let mut created = Vec::new();
        for cfg in cfgs.iter().filter(|cfg| cfg.is_due_on(today)) {
            self.planner.create_repeatable_task(cfg, today).await?;
            self.repeat_cfgs
                .record_task_creation(cfg.id(), today)
                .await?;
            created.push(cfg.id().clone());
        }
        let added_due_today = self.planner.add_all_due_today(today).await?;
        info!(
            %today,
            created = created.len(),
            added_due_today,
            "repeatable tasks created"
        );
        Ok(DueTaskReport {
            created,
            added_due_today,
            generation,
        })
    }
}
