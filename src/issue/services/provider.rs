//! Provider base engine.
//!
//! [`IssueProviderService`] owns everything that is shared between
//! backends: configuration resolution, the single-task refresh algorithm,
//! the concurrent fan-out, the one-call batch path and search delegation.
//! Backend differences enter only through the adapter hooks.

use crate::issue::{
    adapters::providers::{
        BacklogSource, Backend, BulkRefresh, CalendarAdapter, ItemBackend, LinkSource, text,
    },
    domain::{
        IssueId, IssueLink, IssueProviderConfig, IssueProviderId, IssueProviderKind, IssueUpdate,
        LocalTask, RefreshResult, RemoteIssue, RemoteItem, SearchResultItem, TaskId,
    },
    ports::{CalendarApi, ConfigStoreError, IssueApi, IssueApiError, IssueProviderConfigStore},
};
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Errors surfaced by provider operations.
#[derive(Debug, Clone, Error)]
pub enum IssueProviderError {
    /// No configuration of the service's kind exists for the provider.
    #[error("no {kind} configuration for provider {provider_id}")]
    ConfigNotFound {
        /// Requested provider identifier.
        provider_id: IssueProviderId,
        /// Kind of the service that asked.
        kind: IssueProviderKind,
    },

    /// The task is not linked to a remote issue.
    #[error("task {0} has no issue link")]
    MissingIssueLink(TaskId),

    /// A batch refresh received tasks of more than one provider.
    #[error("batch mixes provider {found} into a refresh of provider {expected}")]
    MixedProviderBatch {
        /// Provider of the first linked task.
        expected: IssueProviderId,
        /// First differing provider.
        found: IssueProviderId,
    },

    /// The backend API failed.
    #[error(transparent)]
    Backend(#[from] IssueApiError),

    /// The configuration store failed.
    #[error(transparent)]
    ConfigStore(ConfigStoreError),

    /// No service is registered for the kind.
    #[error("no provider registered for {0}")]
    ProviderNotRegistered(IssueProviderKind),
}

impl From<ConfigStoreError> for IssueProviderError {
    fn from(err: ConfigStoreError) -> Self {
        match err {
            ConfigStoreError::NotFound { provider_id, kind } => {
                Self::ConfigNotFound { provider_id, kind }
            }
            other @ ConfigStoreError::Persistence(_) => Self::ConfigStore(other),
        }
    }
}

/// Result type for provider operations.
pub type IssueProviderResult<T> = Result<T, IssueProviderError>;

/// A task together with its issue link.
#[derive(Clone, Copy)]
struct LinkedTask<'a> {
    task: &'a LocalTask,
    link: &'a IssueLink,
}

/// Keeps linked tasks; unlinked tasks are logged and dropped.
fn linked_tasks(tasks: &[LocalTask]) -> Vec<LinkedTask<'_>> {
    tasks
        .iter()
        .filter_map(|task| match task.issue_link() {
            Some(link) => Some(LinkedTask { task, link }),
            None => {
                warn!(task_id = %task.id(), "excluding task without issue link from refresh");
                None
            }
        })
        .collect()
}

/// Returns the provider shared by every task, or `None` for an empty list.
fn shared_provider_id<'a>(
    linked: &[LinkedTask<'a>],
) -> IssueProviderResult<Option<&'a IssueProviderId>> {
    let mut expected: Option<&IssueProviderId> = None;
    for entry in linked {
        let found = entry.link.provider_id();
        match expected {
            None => expected = Some(found),
            Some(first) if first != found => {
                return Err(IssueProviderError::MixedProviderBatch {
                    expected: first.clone(),
                    found: found.clone(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(expected)
}

/// Applies the adapter's comparator; returns the update when stale.
fn evaluate(
    hooks: &dyn ItemBackend,
    task: &LocalTask,
    issue: RemoteIssue,
    config: &IssueProviderConfig,
) -> Option<IssueUpdate> {
    let task_changes = hooks.refresh_changes(&issue, config);
    let marker = hooks.remote_marker(&issue);
    let comments = text::comment_stamps(&issue);
    let stale = hooks
        .freshness_policy(config)
        .is_stale(task, marker.as_ref(), &comments, &task_changes);
    if !stale {
        return None;
    }
    Some(IssueUpdate {
        issue_title: hooks.snack_title(&issue, config),
        task_changes,
        issue: RemoteItem::Issue(issue),
    })
}

/// Base engine for one backend kind.
pub struct IssueProviderService<S>
where
    S: IssueProviderConfigStore,
{
    config_store: Arc<S>,
    backend: Backend,
}

impl<S> IssueProviderService<S>
where
    S: IssueProviderConfigStore,
{
    /// Creates a service for `backend`.
    #[must_use]
    pub const fn new(config_store: Arc<S>, backend: Backend) -> Self {
        Self {
            config_store,
            backend,
        }
    }

    /// Returns the backend kind served.
    #[must_use]
    pub fn kind(&self) -> IssueProviderKind {
        self.backend.kind()
    }

    /// Returns the interval between background refreshes.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.backend.poll_interval()
    }

    /// Resolves the configuration of `provider_id` for this backend kind.
    ///
    /// # Errors
    ///
    /// Returns [`IssueProviderError::ConfigNotFound`] when the store has no
    /// configuration of this kind for the identifier.
    pub async fn resolve_config(
        &self,
        provider_id: &IssueProviderId,
    ) -> IssueProviderResult<IssueProviderConfig> {
        let config = self
            .config_store
            .get_config(provider_id, self.kind())
            .await?;
        self.backend.observe_config(&config);
        Ok(config)
    }

    /// Fetches one remote issue.
    ///
    /// Returns `None` when the backend reports the issue as missing. Calendar
    /// backends never fetch single items and always answer `None`.
    ///
    /// # Errors
    ///
    /// Returns configuration and backend errors unchanged.
    #[instrument(skip(self), fields(kind = %self.kind()))]
    pub async fn fetch_by_id(
        &self,
        issue_id: &IssueId,
        provider_id: &IssueProviderId,
    ) -> IssueProviderResult<Option<RemoteIssue>> {
        match &self.backend {
            Backend::PerItem { api, .. } => {
                let config = self.resolve_config(provider_id).await?;
                Ok(api.get_by_id(issue_id, &config).await?)
            }
            Backend::BulkOnly { .. } => Ok(None),
        }
    }

    /// Searches remote items.
    ///
    /// A disabled configuration answers an empty list without contacting
    /// the backend.
    ///
    /// # Errors
    ///
    /// Returns configuration and backend errors unchanged.
    #[instrument(skip(self), fields(kind = %self.kind()))]
    pub async fn search(
        &self,
        term: &str,
        provider_id: &IssueProviderId,
    ) -> IssueProviderResult<Vec<SearchResultItem>> {
        let config = self.resolve_config(provider_id).await?;
        if !self.backend.is_enabled(&config) {
            debug!("provider disabled, skipping search");
            return Ok(Vec::new());
        }
        match &self.backend {
            Backend::PerItem { adapter, api } => {
                let hooks = adapter.hooks();
                let issues = api.search(term, &config).await?;
                Ok(issues
                    .into_iter()
                    .map(|issue| SearchResultItem {
                        title: hooks.issue_title(&issue, &config),
                        issue_type: hooks.kind(),
                        issue_data: RemoteItem::Issue(issue),
                    })
                    .collect())
            }
            Backend::BulkOnly { adapter, api } => {
                let events = api.request_events(&config, true).await?;
                Ok(adapter.search_items(events, term))
            }
        }
    }

    /// Refreshes one task.
    ///
    /// Returns `None` when the remote issue is gone or unchanged, otherwise
    /// the patch flagged with `issue_was_updated`.
    ///
    /// # Errors
    ///
    /// Returns [`IssueProviderError::MissingIssueLink`] for unlinked tasks,
    /// and configuration and backend errors unchanged.
    #[instrument(skip(self, task), fields(kind = %self.kind(), task_id = %task.id()))]
    pub async fn check_freshness_and_build_patch(
        &self,
        task: &LocalTask,
    ) -> IssueProviderResult<Option<IssueUpdate>> {
        let link = task
            .issue_link()
            .ok_or(IssueProviderError::MissingIssueLink(task.id()))?;
        match &self.backend {
            Backend::PerItem { adapter, api } => {
                let config = self.resolve_config(link.provider_id()).await?;
                let Some(issue) = api.get_by_id(link.issue_id(), &config).await? else {
                    debug!(issue_id = %link.issue_id(), "remote issue not found");
                    return Ok(None);
                };
                let update = evaluate(adapter.hooks(), task, issue, &config);
                debug!(stale = update.is_some(), "freshness checked");
                Ok(update)
            }
            Backend::BulkOnly { adapter, api } => {
                let linked = [LinkedTask { task, link }];
                let results = self
                    .refresh_calendar(adapter, api.as_ref(), &linked)
                    .await?;
                Ok(results.into_iter().next().map(RefreshResult::into_update))
            }
        }
    }

    /// Refreshes many tasks.
    ///
    /// Tasks without an issue link are left out. Per-task backends run one
    /// concurrent check per task and return results in completion order.
    /// Batch backends issue a single API call for the whole list and return
    /// results in input order.
    ///
    /// # Errors
    ///
    /// Returns [`IssueProviderError::MixedProviderBatch`] when a batch
    /// backend receives tasks of several providers, and configuration and
    /// backend errors unchanged.
    #[instrument(skip(self, tasks), fields(kind = %self.kind(), tasks = tasks.len()))]
    pub async fn check_freshness_for_many(
        &self,
        tasks: &[LocalTask],
    ) -> IssueProviderResult<Vec<RefreshResult>> {
        let linked = linked_tasks(tasks);
        if linked.is_empty() {
            return Ok(Vec::new());
        }
        match &self.backend {
            Backend::PerItem { adapter, api } => {
                let hooks = adapter.hooks();
                match hooks.bulk_refresh() {
                    BulkRefresh::PerTask => self.fan_out(&linked).await,
                    BulkRefresh::OpenItems | BulkRefresh::ByIds => {
                        self.refresh_in_bulk(hooks, api.as_ref(), &linked).await
                    }
                }
            }
            Backend::BulkOnly { adapter, api } => {
                self.refresh_calendar(adapter, api.as_ref(), &linked).await
            }
        }
    }

    /// Checks that `config` reaches the backend. Failures become `false`.
    #[instrument(
        skip(self, config),
        fields(kind = %self.kind(), provider_id = %config.provider_id())
    )]
    pub async fn test_connection(&self, config: &IssueProviderConfig) -> bool {
        let outcome = match &self.backend {
            Backend::PerItem { api, .. } => api.test_connection(config).await,
            Backend::BulkOnly { api, .. } => api.test_connection(config).await,
        };
        outcome.unwrap_or_else(|err| {
            warn!(error = %err, "connection test failed");
            false
        })
    }

    /// Returns the browser link of an issue, or an empty string when the
    /// backend cannot build one.
    ///
    /// # Errors
    ///
    /// Returns configuration errors, and backend errors for backends that
    /// must ask the API.
    pub async fn issue_link(
        &self,
        issue_id: &IssueId,
        provider_id: &IssueProviderId,
    ) -> IssueProviderResult<String> {
        let Backend::PerItem { adapter, api } = &self.backend else {
            return Ok(String::new());
        };
        let config = self.resolve_config(provider_id).await?;
        match adapter.hooks().link(issue_id, &config) {
            LinkSource::Url(url) => Ok(url),
            LinkSource::IssueUrl => Ok(api
                .get_by_id(issue_id, &config)
                .await?
                .and_then(|issue| issue.url().map(str::to_owned))
                .unwrap_or_default()),
            LinkSource::ApiLookup => Ok(api
                .issue_url(issue_id, &config)
                .await?
                .unwrap_or_default()),
        }
    }

    /// Lists remote items offered for backlog import, leaving out
    /// `existing_ids`.
    ///
    /// # Errors
    ///
    /// Returns configuration and backend errors unchanged.
    #[instrument(skip(self, existing_ids), fields(kind = %self.kind()))]
    pub async fn list_new_backlog_candidates(
        &self,
        provider_id: &IssueProviderId,
        existing_ids: &[IssueId],
    ) -> IssueProviderResult<Vec<RemoteIssue>> {
        let Backend::PerItem { adapter, api } = &self.backend else {
            return Ok(Vec::new());
        };
        let config = self.resolve_config(provider_id).await?;
        let candidates = match adapter.hooks().backlog_source(&config) {
            BacklogSource::Listing => api.list_backlog(&config).await?,
            BacklogSource::Search(query) => api.search(&query, &config).await?,
            BacklogSource::OpenItems => api.list_open(&config).await?,
        };
        let known: HashSet<&IssueId> = existing_ids.iter().collect();
        Ok(candidates
            .into_iter()
            .filter(|issue| !known.contains(issue.id()))
            .collect())
    }

    async fn fan_out(&self, linked: &[LinkedTask<'_>]) -> IssueProviderResult<Vec<RefreshResult>> {
        let mut pending: FuturesUnordered<_> = linked
            .iter()
            .map(|entry| async move {
                let update = self.check_freshness_and_build_patch(entry.task).await?;
                Ok::<_, IssueProviderError>(
                    update.map(|found| RefreshResult::from_update(entry.task.clone(), found)),
                )
            })
            .collect();
        let mut results = Vec::new();
        while let Some(outcome) = pending.next().await {
            if let Some(result) = outcome? {
                results.push(result);
            }
        }
        Ok(results)
    }

    async fn refresh_in_bulk(
        &self,
        hooks: &dyn ItemBackend,
        api: &dyn IssueApi,
        linked: &[LinkedTask<'_>],
    ) -> IssueProviderResult<Vec<RefreshResult>> {
        let Some(provider_id) = shared_provider_id(linked)? else {
            return Ok(Vec::new());
        };
        let config = self.resolve_config(provider_id).await?;
        let remote = if hooks.bulk_refresh() == BulkRefresh::OpenItems {
            api.list_open(&config).await?
        } else {
            let ids: Vec<IssueId> = linked
                .iter()
                .map(|entry| entry.link.issue_id().clone())
                .collect();
            api.get_by_ids(&ids, &config).await?
        };
        let by_id: HashMap<IssueId, RemoteIssue> = remote
            .into_iter()
            .map(|issue| (issue.id().clone(), issue))
            .collect();

        let results: Vec<RefreshResult> = linked
            .iter()
            .filter_map(|entry| {
                let issue = by_id.get(entry.link.issue_id())?.clone();
                evaluate(hooks, entry.task, issue, &config)
                    .map(|update| RefreshResult::from_update(entry.task.clone(), update))
            })
            .collect();
        debug!(
            remote = by_id.len(),
            stale = results.len(),
            "batch refresh finished"
        );
        Ok(results)
    }

    async fn refresh_calendar(
        &self,
        adapter: &CalendarAdapter,
        api: &dyn CalendarApi,
        linked: &[LinkedTask<'_>],
    ) -> IssueProviderResult<Vec<RefreshResult>> {
        let mut groups: Vec<(&IssueProviderId, Vec<&LocalTask>)> = Vec::new();
        for entry in linked {
            let provider_id = entry.link.provider_id();
            match groups.iter_mut().find(|(id, _)| *id == provider_id) {
                Some((_, tasks)) => tasks.push(entry.task),
                None => groups.push((provider_id, vec![entry.task])),
            }
        }

        let mut results = Vec::new();
        for (provider_id, tasks) in groups {
            let config = self.resolve_config(provider_id).await?;
            let events = api.request_events(&config, false).await?;
            for task in tasks {
                let Some(event) = adapter.find_event(task, &events) else {
                    continue;
                };
                if let Some(task_changes) = adapter.refresh_changes(task, event) {
                    results.push(RefreshResult {
                        task: task.clone(),
                        task_changes,
                        issue: RemoteItem::Event(event.clone()),
                        issue_title: event.title().to_owned(),
                    });
                }
            }
        }
        Ok(results)
    }
}
