//! Configuration store port.

use crate::issue::domain::{IssueProviderConfig, IssueProviderId, IssueProviderKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration store operations.
pub type ConfigStoreResult<T> = Result<T, ConfigStoreError>;

/// Read access to persisted provider configurations.
#[async_trait]
pub trait IssueProviderConfigStore: Send + Sync {
    /// Returns the configuration snapshot for `provider_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::NotFound`] when no configuration exists
    /// for the identifier or when the stored configuration belongs to a
    /// different backend kind.
    async fn get_config(
        &self,
        provider_id: &IssueProviderId,
        kind: IssueProviderKind,
    ) -> ConfigStoreResult<IssueProviderConfig>;
}

/// Errors returned by configuration store implementations.
#[derive(Debug, Clone, Error)]
pub enum ConfigStoreError {
    /// No configuration of the requested kind exists.
    #[error("no {kind} configuration for provider {provider_id}")]
    NotFound {
        /// Requested provider identifier.
        provider_id: IssueProviderId,
        /// Requested backend kind.
        kind: IssueProviderKind,
    },

    /// Persistence-layer failure.
    #[error("configuration store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConfigStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
