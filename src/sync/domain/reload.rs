//! Observable state of the reload process.

/// Snapshot published by the reload coordinator.
///
/// `generation` counts completed reloads. It only moves when a reload has
/// fully applied its state, so two equal generations guarantee that no
/// reload finished in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadState {
    generation: u64,
    active: usize,
}

impl ReloadState {
    /// Returns the number of completed reloads.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether at least one reload is running.
    #[must_use]
    pub const fn in_progress(&self) -> bool {
        self.active > 0
    }

    /// State after a reload started.
    #[must_use]
    pub const fn started(self) -> Self {
        Self {
            generation: self.generation,
            active: self.active.saturating_add(1),
        }
    }

    /// State after a reload applied its data.
    #[must_use]
    pub const fn completed(self) -> Self {
        Self {
            generation: self.generation.saturating_add(1),
            active: self.active.saturating_sub(1),
        }
    }

    /// State after a reload ended without applying anything.
    #[must_use]
    pub const fn aborted(self) -> Self {
        Self {
            generation: self.generation,
            active: self.active.saturating_sub(1),
        }
    }

    /// Returns whether a reload completed or is running since `earlier`.
    #[must_use]
    pub const fn moved_since(&self, earlier: &Self) -> bool {
        self.generation != earlier.generation || self.in_progress()
    }
}
