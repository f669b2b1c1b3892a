//! Services that order periodic work around data reloads.

mod due_tasks;
mod poller;
mod reload;

pub use due_tasks::{DueTaskConsumer, DueTaskError, DueTaskReport};
pub use poller::{FALLBACK_POLL_INTERVAL, IssuePoller, PollError, PollOutcome};
pub use reload::{ReloadCoordinator, ReloadError, ReloadTicket, ReloadWatcher};
