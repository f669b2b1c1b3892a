//! Port contracts for issue provider integration.
//!
//! Ports define infrastructure-agnostic interfaces to the configuration
//! store and to each backend's HTTP client.

pub mod config_store;
pub mod issue_api;

pub use config_store::{ConfigStoreError, ConfigStoreResult, IssueProviderConfigStore};
pub use issue_api::{CalendarApi, IssueApi, IssueApiError, IssueApiResult};
