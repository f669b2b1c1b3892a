//! Explicit reload completion signal.
//!
//! The reload process asks for a [`ReloadTicket`] before it starts
//! replacing state and completes it once the new state is visible.
//! Completion is the only event that advances the reload generation, so a
//! consumer that waits for a new generation never reads a half-applied
//! snapshot.

use crate::sync::domain::ReloadState;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Errors surfaced while observing reloads.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ReloadError {
    /// Every coordinator handle and ticket was dropped.
    #[error("reload coordinator closed")]
    CoordinatorClosed,
}

/// Publishes reload progress to any number of watchers.
#[derive(Debug, Clone)]
pub struct ReloadCoordinator {
    sender: Arc<watch::Sender<ReloadState>>,
}

impl Default for ReloadCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadCoordinator {
    /// Creates a coordinator with no reload running.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(ReloadState::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Marks a reload as started.
    ///
    /// The returned ticket must be completed once the reloaded state is
    /// visible to readers. Dropping it instead ends the reload as aborted.
    #[must_use = "dropping the ticket aborts the reload"]
    pub fn begin_reload(&self) -> ReloadTicket {
        self.sender.send_modify(|state| *state = state.started());
        let state = *self.sender.borrow();
        debug!(generation = state.generation(), "reload started");
        ReloadTicket {
            sender: Arc::clone(&self.sender),
            finished: false,
        }
    }

    /// Returns the current reload state.
    #[must_use]
    pub fn state(&self) -> ReloadState {
        *self.sender.borrow()
    }

    /// Creates a watcher that has seen every completion up to now.
    #[must_use]
    pub fn watcher(&self) -> ReloadWatcher {
        let receiver = self.sender.subscribe();
        let seen_generation = receiver.borrow().generation();
        ReloadWatcher {
            receiver,
            seen_generation,
        }
    }
}

/// Handle held by the reload process for one reload.
#[derive(Debug)]
pub struct ReloadTicket {
    sender: Arc<watch::Sender<ReloadState>>,
    finished: bool,
}

impl ReloadTicket {
    /// Publishes the completion of this reload.
    ///
    /// Consuming the ticket makes completion a one-time event.
    pub fn complete(mut self) {
        self.finished = true;
        self.sender.send_modify(|state| *state = state.completed());
        let generation = self.sender.borrow().generation();
        debug!(generation, "reload completed");
    }
}

impl Drop for ReloadTicket {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.sender.send_modify(|state| *state = state.aborted());
        warn!("reload ticket dropped before completion, reload aborted");
    }
}

/// Receives reload progress.
#[derive(Debug, Clone)]
pub struct ReloadWatcher {
    receiver: watch::Receiver<ReloadState>,
    seen_generation: u64,
}

impl ReloadWatcher {
    /// Returns the current reload state.
    #[must_use]
    pub fn current(&self) -> ReloadState {
        *self.receiver.borrow()
    }

    /// Waits until no reload is running.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::CoordinatorClosed`] when the coordinator is
    /// gone while a reload is still marked as running.
    pub async fn wait_idle(&mut self) -> Result<ReloadState, ReloadError> {
        let state = self
            .receiver
            .wait_for(|state| !state.in_progress())
            .await
            .map(|state| *state)
            .map_err(|_| ReloadError::CoordinatorClosed)?;
        Ok(state)
    }

    /// Waits for the next completed reload this watcher has not seen.
    ///
    /// Completions that happened since the previous call are reported
    /// immediately. The returned state has no reload running.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::CoordinatorClosed`] when the coordinator is
    /// gone.
    pub async fn next_completion(&mut self) -> Result<ReloadState, ReloadError> {
        let seen = self.seen_generation;
        let state = self
            .receiver
            .wait_for(|state| state.generation() > seen && !state.in_progress())
            .await
            .map(|state| *state)
            .map_err(|_| ReloadError::CoordinatorClosed)?;
        self.seen_generation = state.generation();
        Ok(state)
    }
}
