//! Registry of provider services keyed by backend kind.
//!
//! The registry is the entry point used by the background poller: it routes
//! a mixed list of linked tasks to the service of each task's backend.

use super::provider::{IssueProviderError, IssueProviderResult, IssueProviderService};
use crate::issue::{
    domain::{IssueProviderId, IssueProviderKind, LocalTask, RefreshResult},
    ports::IssueProviderConfigStore,
};
use futures_util::future::try_join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Provider services, one per backend kind.
pub struct ProviderRegistry<S>
where
    S: IssueProviderConfigStore,
{
    services: BTreeMap<IssueProviderKind, Arc<IssueProviderService<S>>>,
}

impl<S> Default for ProviderRegistry<S>
where
    S: IssueProviderConfigStore,
{
    fn default() -> Self {
        Self {
            services: BTreeMap::new(),
        }
    }
}

impl<S> ProviderRegistry<S>
where
    S: IssueProviderConfigStore,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `service` under its kind, returning the service it replaced.
    pub fn register(
        &mut self,
        service: IssueProviderService<S>,
    ) -> Option<Arc<IssueProviderService<S>>> {
        self.services.insert(service.kind(), Arc::new(service))
    }

    /// Returns the service for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`IssueProviderError::ProviderNotRegistered`] for unknown kinds.
    pub fn service(
        &self,
        kind: IssueProviderKind,
    ) -> IssueProviderResult<&IssueProviderService<S>> {
        self.services
            .get(&kind)
            .map(Arc::as_ref)
            .ok_or(IssueProviderError::ProviderNotRegistered(kind))
    }

    /// Lists registered kinds in a stable order.
    pub fn kinds(&self) -> impl Iterator<Item = IssueProviderKind> + '_ {
        self.services.keys().copied()
    }

    /// Shortest poll interval among registered services.
    #[must_use]
    pub fn min_poll_interval(&self) -> Option<Duration> {
        self.services
            .values()
            .map(|service| service.poll_interval())
            .min()
    }

    /// Refreshes tasks of any backend.
    ///
    /// Tasks are grouped by backend kind and provider in first-seen order;
    /// each group goes through its service's batch path, and groups run
    /// concurrently. Unlinked tasks are left out.
    ///
    /// # Errors
    ///
    /// Returns [`IssueProviderError::ProviderNotRegistered`] when a task
    /// links to an unregistered kind, and the first failure of any group.
    pub async fn refresh_tasks(
        &self,
        tasks: &[LocalTask],
    ) -> IssueProviderResult<Vec<RefreshResult>> {
        let mut groups: Vec<((IssueProviderKind, &IssueProviderId), Vec<LocalTask>)> = Vec::new();
        for task in tasks {
            let Some(link) = task.issue_link() else {
                warn!(task_id = %task.id(), "excluding task without issue link from refresh");
                continue;
            };
            let key = (link.issue_type(), link.provider_id());
            match groups.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, members)) => members.push(task.clone()),
                None => groups.push((key, vec![task.clone()])),
            }
        }

        let mut batches = Vec::with_capacity(groups.len());
        for ((kind, provider_id), members) in groups {
            let service = self.service(kind)?;
            debug!(%kind, %provider_id, tasks = members.len(), "refreshing provider group");
            batches.push(async move { service.check_freshness_for_many(&members).await });
        }
        let results = try_join_all(batches).await?;
        Ok(results.into_iter().flatten().collect())
    }
}
