//! In-memory adapters for tests and embedding without real backends.

mod calendar_api;
mod config_store;
mod issue_api;

pub use calendar_api::InMemoryCalendarApi;
pub use config_store::InMemoryConfigStore;
pub use issue_api::InMemoryIssueApi;

use crate::issue::ports::IssueApiError;

fn lock_poisoned(err: impl std::fmt::Display) -> IssueApiError {
    IssueApiError::transport(std::io::Error::other(err.to_string()))
}
