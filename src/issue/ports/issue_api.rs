//! Backend API ports.
//!
//! One client instance exists per backend kind. Clients decode wire formats
//! into [`RemoteIssue`] / [`CalendarEvent`] values; adapters interpret them.

use crate::issue::domain::{CalendarEvent, IssueId, IssueProviderConfig, RemoteIssue};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backend API operations.
pub type IssueApiResult<T> = Result<T, IssueApiError>;

/// Raw operations of an issue-tracker backend.
#[async_trait]
pub trait IssueApi: Send + Sync {
    /// Fetches one issue.
    ///
    /// Returns `None` when the backend reports the issue as missing.
    async fn get_by_id(
        &self,
        id: &IssueId,
        config: &IssueProviderConfig,
    ) -> IssueApiResult<Option<RemoteIssue>>;

    /// Fetches several issues; missing ones are left out.
    ///
    /// The default issues one request per identifier.
    async fn get_by_ids(
        &self,
        ids: &[IssueId],
        config: &IssueProviderConfig,
    ) -> IssueApiResult<Vec<RemoteIssue>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(issue) = self.get_by_id(id, config).await? {
                found.push(issue);
            }
        }
        Ok(found)
    }

    /// Searches issues matching `term`.
    async fn search(
        &self,
        term: &str,
        config: &IssueProviderConfig,
    ) -> IssueApiResult<Vec<RemoteIssue>>;

    /// Lists every open item in one request.
    ///
    /// # Errors
    ///
    /// The default returns [`IssueApiError::Unsupported`]; only backends
    /// with an efficient listing endpoint implement it.
    async fn list_open(&self, _config: &IssueProviderConfig) -> IssueApiResult<Vec<RemoteIssue>> {
        Err(IssueApiError::Unsupported("list_open"))
    }

    /// Lists the items the backend proposes for backlog import.
    async fn list_backlog(&self, config: &IssueProviderConfig)
    -> IssueApiResult<Vec<RemoteIssue>>;

    /// Asks the backend for an issue's browser URL.
    ///
    /// The default knows no URL.
    async fn issue_url(
        &self,
        _id: &IssueId,
        _config: &IssueProviderConfig,
    ) -> IssueApiResult<Option<String>> {
        Ok(None)
    }

    /// Checks that the configuration can reach the backend.
    async fn test_connection(&self, config: &IssueProviderConfig) -> IssueApiResult<bool>;
}

/// Raw operations of a calendar feed backend.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Lists events of one calendar; `include_past` widens the window to
    /// events that already started.
    async fn request_events(
        &self,
        config: &IssueProviderConfig,
        include_past: bool,
    ) -> IssueApiResult<Vec<CalendarEvent>>;

    /// Checks that the feed can be read.
    async fn test_connection(&self, config: &IssueProviderConfig) -> IssueApiResult<bool>;
}

/// Errors returned by backend API clients.
#[derive(Debug, Clone, Error)]
pub enum IssueApiError {
    /// The backend answered but refused or failed the request.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The client does not implement the operation.
    #[error("operation not supported by backend: {0}")]
    Unsupported(&'static str),

    /// Network or decoding failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueApiError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
