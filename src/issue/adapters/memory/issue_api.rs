//! In-memory issue backend.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::issue::{
    domain::{IssueId, IssueProviderConfig, RemoteIssue},
    ports::{IssueApi, IssueApiError, IssueApiResult},
};

/// Thread-safe in-memory issue backend.
///
/// Serves every API operation from a map of issues, counts calls per
/// operation name, and can be switched into a failing mode.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueApi {
    state: Arc<RwLock<InMemoryIssueState>>,
}

#[derive(Debug, Default)]
struct InMemoryIssueState {
    issues: BTreeMap<IssueId, RemoteIssue>,
    backlog: Option<Vec<RemoteIssue>>,
    urls: HashMap<IssueId, String>,
    failure: Option<IssueApiError>,
    connection_refused: bool,
    calls: HashMap<&'static str, usize>,
}

impl InMemoryIssueApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend serving `issues`.
    #[must_use]
    pub fn with_issues(issues: impl IntoIterator<Item = RemoteIssue>) -> Self {
        let api = Self::new();
        for issue in issues {
            api.upsert(issue);
        }
        api
    }

    /// Inserts or replaces an issue.
    pub fn upsert(&self, issue: RemoteIssue) {
        if let Ok(mut state) = self.state.write() {
            state.issues.insert(issue.id().clone(), issue);
        }
    }

    /// Removes an issue, as if it was deleted remotely.
    pub fn remove(&self, id: &IssueId) {
        if let Ok(mut state) = self.state.write() {
            state.issues.remove(id);
        }
    }

    /// Sets a dedicated backlog listing; without one the backlog is every
    /// stored issue.
    pub fn set_backlog(&self, backlog: Vec<RemoteIssue>) {
        if let Ok(mut state) = self.state.write() {
            state.backlog = Some(backlog);
        }
    }

    /// Sets the URL answered by [`IssueApi::issue_url`].
    pub fn set_issue_url(&self, id: IssueId, url: impl Into<String>) {
        if let Ok(mut state) = self.state.write() {
            state.urls.insert(id, url.into());
        }
    }

    /// Makes every following call fail with `error`.
    pub fn fail_with(&self, error: IssueApiError) {
        if let Ok(mut state) = self.state.write() {
            state.failure = Some(error);
        }
    }

    /// Makes connection tests answer `false` without failing.
    pub fn refuse_connections(&self) {
        if let Ok(mut state) = self.state.write() {
            state.connection_refused = true;
        }
    }

    /// Returns how often `operation` was called.
    #[must_use]
    pub fn calls(&self, operation: &str) -> usize {
        self.state
            .read()
            .map_or(0, |state| state.calls.get(operation).copied().unwrap_or_default())
    }

    /// Returns the number of calls of any operation.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.state
            .read()
            .map_or(0, |state| state.calls.values().sum())
    }

    fn record<T>(
        &self,
        operation: &'static str,
        answer: impl FnOnce(&InMemoryIssueState) -> T,
    ) -> IssueApiResult<T> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let count = state.calls.entry(operation).or_default();
        *count = count.saturating_add(1);
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        Ok(answer(&state))
    }
}

fn matches_term(issue: &RemoteIssue, term: &str) -> bool {
    let needle = term.to_lowercase();
    issue.title().to_lowercase().contains(&needle)
        || issue
            .key()
            .is_some_and(|key| key.to_lowercase().contains(&needle))
}

#[async_trait]
impl IssueApi for InMemoryIssueApi {
    async fn get_by_id(
        &self,
        id: &IssueId,
        _config: &IssueProviderConfig,
    ) -> IssueApiResult<Option<RemoteIssue>> {
        self.record("get_by_id", |state| state.issues.get(id).cloned())
    }

    async fn get_by_ids(
        &self,
        ids: &[IssueId],
        _config: &IssueProviderConfig,
    ) -> IssueApiResult<Vec<RemoteIssue>> {
        self.record("get_by_ids", |state| {
            ids.iter()
                .filter_map(|id| state.issues.get(id).cloned())
                .collect()
        })
    }

    async fn search(
        &self,
        term: &str,
        _config: &IssueProviderConfig,
    ) -> IssueApiResult<Vec<RemoteIssue>> {
        self.record("search", |state| {
            state
                .issues
                .values()
                .filter(|issue| matches_term(issue, term))
                .cloned()
                .collect()
        })
    }

    async fn list_open(&self, _config: &IssueProviderConfig) -> IssueApiResult<Vec<RemoteIssue>> {
        self.record("list_open", |state| state.issues.values().cloned().collect())
    }

    async fn list_backlog(
        &self,
        _config: &IssueProviderConfig,
    ) -> IssueApiResult<Vec<RemoteIssue>> {
        self.record("list_backlog", |state| {
            state
                .backlog
                .clone()
                .unwrap_or_else(|| state.issues.values().cloned().collect())
        })
    }

    async fn issue_url(
        &self,
        id: &IssueId,
        _config: &IssueProviderConfig,
    ) -> IssueApiResult<Option<String>> {
        self.record("issue_url", |state| {
            state.urls.get(id).cloned().or_else(|| {
                state
                    .issues
                    .get(id)
                    .and_then(|issue| issue.url().map(str::to_owned))
            })
        })
    }

    async fn test_connection(&self, _config: &IssueProviderConfig) -> IssueApiResult<bool> {
        self.record("test_connection", |state| !state.connection_refused)
    }
}
