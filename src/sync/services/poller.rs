//! Background issue refresh that yields to reloads.

use super::reload::ReloadCoordinator;
use crate::issue::{
    ports::IssueProviderConfigStore,
    services::{IssueProviderError, ProviderRegistry},
};
use crate::sync::ports::{IssueTaskStore, SyncPortError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Interval used when no provider service is registered.
pub const FALLBACK_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Errors raised by a poll.
#[derive(Debug, Clone, Error)]
pub enum PollError {
    /// The refresh failed.
    #[error(transparent)]
    Provider(#[from] IssueProviderError),
    /// The task store failed.
    #[error(transparent)]
    Port(#[from] SyncPortError),
}

/// Outcome of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A reload was running; nothing was fetched.
    Skipped,
    /// A reload started or completed while fetching; results were dropped.
    Discarded {
        /// Stale tasks found before the reload interfered.
        stale: usize,
    },
    /// Results were applied to the task store.
    Applied {
        /// Tasks patched.
        updated: usize,
    },
}

/// Periodically refreshes linked tasks through the provider registry.
pub struct IssuePoller<S, T>
where
    S: IssueProviderConfigStore,
    T: IssueTaskStore,
{
    registry: Arc<ProviderRegistry<S>>,
    tasks: Arc<T>,
    reloads: ReloadCoordinator,
}

impl<S, T> IssuePoller<S, T>
where
    S: IssueProviderConfigStore,
    T: IssueTaskStore,
{
    /// Creates a poller bound to `reloads`.
    #[must_use]
    pub const fn new(
        registry: Arc<ProviderRegistry<S>>,
        tasks: Arc<T>,
        reloads: ReloadCoordinator,
    ) -> Self {
        Self {
            registry,
            tasks,
            reloads,
        }
    }

    /// Interval between polls: the shortest interval of any registered
    /// provider.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.registry
            .min_poll_interval()
            .unwrap_or(FALLBACK_POLL_INTERVAL)
    }

    /// Refreshes every linked task once.
    ///
    /// Refresh results computed from state that a reload replaced are
    /// never applied.
    ///
    /// # Errors
    ///
    /// Returns [`PollError`] when the refresh or a store call fails.
    #[instrument(skip(self))]
    pub async fn poll_once(&self) -> Result<PollOutcome, PollError> {
        let before = self.reloads.state();
        if before.in_progress() {
            debug!("reload running, skipping poll");
            return Ok(PollOutcome::Skipped);
        }
        let tasks = self.tasks.linked_tasks().await?;
        let results = self.registry.refresh_tasks(&tasks).await?;
        if self.reloads.state().moved_since(&before) {
            warn!(
                stale = results.len(),
                "reload interleaved with poll, discarding results"
            );
            return Ok(PollOutcome::Discarded {
                stale: results.len(),
            });
        }
        let updated = self.tasks.apply_refresh(&results).await?;
        info!(updated, "issue refresh applied");
        Ok(PollOutcome::Applied { updated })
    }

    /// Polls every [`Self::interval`] until `shutdown` turns `true`.
    ///
    /// Failed polls are logged; the loop keeps running.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            if *shutdown.borrow() {
                return;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = self.poll_once().await {
                        warn!(error = %err, "issue poll failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
    }
}
