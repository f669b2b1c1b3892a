//! Error types for sync domain validation.

use thiserror::Error;

/// Errors returned while constructing sync domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncDomainError {
    /// The repeat configuration identifier is empty after trimming.
    #[error("repeat configuration identifier must not be empty")]
    EmptyRepeatCfgId,

    /// A repeat interval of zero units never advances.
    #[error("repeat interval must be at least one unit")]
    ZeroRepeatInterval,
}
