//! Error types for issue domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing issue domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueDomainError {
    /// The issue provider kind is unsupported.
    #[error("unsupported issue provider kind: {0}")]
    InvalidProviderKind(String),

    /// The provider identifier is empty after trimming.
    #[error("issue provider identifier must not be empty")]
    EmptyProviderId,

    /// The issue identifier is empty after trimming.
    #[error("issue identifier must not be empty")]
    EmptyIssueId,

    /// A provider configuration document could not be decoded.
    #[error("invalid provider configuration: {0}")]
    InvalidConfig(String),
}
