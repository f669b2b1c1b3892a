//! Application services for issue provider synchronization.

mod provider;
mod registry;

pub use provider::{IssueProviderError, IssueProviderResult, IssueProviderService};
pub use registry::ProviderRegistry;
