//! In-memory provider configuration store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::issue::{
    domain::{IssueDomainError, IssueProviderConfig, IssueProviderId, IssueProviderKind},
    ports::{ConfigStoreError, ConfigStoreResult, IssueProviderConfigStore},
};

/// Thread-safe in-memory configuration store.
///
/// Counts lookups so tests can assert how often configuration was resolved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    configs: Arc<RwLock<HashMap<IssueProviderId, IssueProviderConfig>>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configurations from a JSON array of provider documents.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::InvalidConfig`] when the document is not
    /// an array of valid provider configurations.
    pub fn from_json(document: &str) -> Result<Self, IssueDomainError> {
        let configs: Vec<IssueProviderConfig> = serde_json::from_str(document)
            .map_err(|err| IssueDomainError::InvalidConfig(err.to_string()))?;
        let store = Self::new();
        for config in configs {
            store
                .insert(config)
                .map_err(|err| IssueDomainError::InvalidConfig(err.to_string()))?;
        }
        Ok(store)
    }

    /// Inserts or replaces a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::Persistence`] when the store lock is
    /// poisoned.
    pub fn insert(&self, config: IssueProviderConfig) -> ConfigStoreResult<()> {
        let mut configs = self.configs.write().map_err(|err| {
            ConfigStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        configs.insert(config.provider_id().clone(), config);
        Ok(())
    }

    /// Returns how many lookups were served.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueProviderConfigStore for InMemoryConfigStore {
    async fn get_config(
        &self,
        provider_id: &IssueProviderId,
        kind: IssueProviderKind,
    ) -> ConfigStoreResult<IssueProviderConfig> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let configs = self.configs.read().map_err(|err| {
            ConfigStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        configs
            .get(provider_id)
            .filter(|config| config.kind() == kind)
            .cloned()
            .ok_or_else(|| ConfigStoreError::NotFound {
                provider_id: provider_id.clone(),
                kind,
            })
    }
}
