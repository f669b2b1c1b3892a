//! Backend-specific provider adapters.
//!
//! Each supported backend contributes one adapter value. Item backends
//! (everything that can fetch a single remote item) implement
//! [`ItemBackend`] and are collected in the closed [`ItemAdapter`] enum.
//! Calendar feeds cannot be read item by item and are modelled as a separate
//! bulk-only capability, [`CalendarAdapter`]. [`Backend`] pairs an adapter
//! with the API client it drives.

mod azure_devops;
mod caldav;
mod calendar;
mod clickup;
mod gitea;
mod github;
mod gitlab;
mod jira;
mod linear;
mod nextcloud_deck;
mod open_project;
mod redmine;
pub mod text;
mod trello;

pub use azure_devops::AzureDevOpsAdapter;
pub use caldav::CaldavAdapter;
pub use calendar::CalendarAdapter;
pub use clickup::ClickUpAdapter;
pub use gitea::GiteaAdapter;
pub use github::{DEFAULT_BACKLOG_QUERY, GitHubAdapter};
pub use gitlab::{GITLAB_BASE_URL, GitLabAdapter};
pub use jira::JiraAdapter;
pub use linear::LinearAdapter;
pub use nextcloud_deck::NextcloudDeckAdapter;
pub use open_project::OpenProjectAdapter;
pub use redmine::RedmineAdapter;
pub use trello::TrelloAdapter;

use crate::issue::{
    domain::{
        FreshnessMarker, FreshnessPolicy, IssueId, IssueProviderConfig, IssueProviderKind,
        RemoteIssue, TaskChanges,
    },
    ports::{CalendarApi, IssueApi},
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Where an adapter gets an issue's browser link from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSource {
    /// Link built from configuration alone; empty when it cannot be built.
    Url(String),
    /// Link is the `url` of the fetched issue.
    IssueUrl,
    /// Link is asked from the backend API.
    ApiLookup,
}

/// How a backend refreshes many tasks at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkRefresh {
    /// One fetch per task, run concurrently.
    PerTask,
    /// One listing of every open item.
    OpenItems,
    /// One fetch for all requested identifiers.
    ByIds,
}

/// Which API call supplies backlog import candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BacklogSource {
    /// The backend's dedicated backlog listing.
    Listing,
    /// A search with the given query.
    Search(String),
    /// Every open item.
    OpenItems,
}

/// Per-item hooks every item backend provides.
///
/// Hooks are pure: they map remote shapes and configuration to task data
/// and never perform I/O. The provider service drives the API calls.
pub trait ItemBackend: Send + Sync {
    /// Backend kind served by this adapter.
    fn kind(&self) -> IssueProviderKind;

    /// Returns whether `config` is usable for API calls.
    fn is_enabled(&self, config: &IssueProviderConfig) -> bool;

    /// Comparator used to decide whether a task is stale.
    fn freshness_policy(&self, _config: &IssueProviderConfig) -> FreshnessPolicy {
        FreshnessPolicy::Timestamp { comments: None }
    }

    /// Extracts the freshness marker from a remote issue.
    ///
    /// The default parses the `updated` value as a timestamp.
    fn remote_marker(&self, issue: &RemoteIssue) -> Option<FreshnessMarker> {
        issue
            .updated()
            .and_then(text::parse_remote_millis)
            .map(FreshnessMarker::Timestamp)
    }

    /// Full task title for a remote issue.
    fn issue_title(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> String;

    /// Short title shown in update notifications.
    fn snack_title(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> String {
        text::truncate(&self.issue_title(issue, config))
    }

    /// Task fields derived from a remote issue.
    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges;

    /// Patch applied when a refresh finds the issue changed.
    fn refresh_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        self.task_changes(issue, config).mark_updated()
    }

    /// Describes how to build the browser link for `issue_id`.
    fn link(&self, issue_id: &IssueId, config: &IssueProviderConfig) -> LinkSource;

    /// Batch strategy of the backend.
    fn bulk_refresh(&self) -> BulkRefresh {
        BulkRefresh::PerTask
    }

    /// Source of backlog import candidates.
    fn backlog_source(&self, _config: &IssueProviderConfig) -> BacklogSource {
        BacklogSource::Listing
    }

    /// Called with every configuration the service resolves.
    fn observe_config(&self, _config: &IssueProviderConfig) {}

    /// Interval between background refreshes.
    fn poll_interval(&self) -> Duration {
        self.kind().default_poll_interval()
    }
}

/// Closed set of item backend adapters.
#[derive(Debug, Clone)]
pub enum ItemAdapter {
    /// Jira adapter.
    Jira(JiraAdapter),
    /// GitHub adapter.
    GitHub(GitHubAdapter),
    /// GitLab adapter.
    GitLab(GitLabAdapter),
    /// Trello adapter.
    Trello(TrelloAdapter),
    /// Linear adapter.
    Linear(LinearAdapter),
    /// ClickUp adapter.
    ClickUp(ClickUpAdapter),
    /// Gitea adapter.
    Gitea(GiteaAdapter),
    /// Redmine adapter.
    Redmine(RedmineAdapter),
    /// OpenProject adapter.
    OpenProject(OpenProjectAdapter),
    /// Nextcloud Deck adapter.
    NextcloudDeck(NextcloudDeckAdapter),
    /// CalDAV adapter.
    Caldav(CaldavAdapter),
    /// Azure DevOps adapter.
    AzureDevOps(AzureDevOpsAdapter),
}

impl ItemAdapter {
    /// Returns the adapter for `kind`, or `None` for the calendar kind,
    /// which has no per-item capability.
    #[must_use]
    pub fn for_kind(kind: IssueProviderKind) -> Option<Self> {
        let adapter = match kind {
            IssueProviderKind::Jira => Self::Jira(JiraAdapter),
            IssueProviderKind::GitHub => Self::GitHub(GitHubAdapter),
            IssueProviderKind::GitLab => Self::GitLab(GitLabAdapter),
            IssueProviderKind::Trello => Self::Trello(TrelloAdapter),
            IssueProviderKind::Linear => Self::Linear(LinearAdapter),
            IssueProviderKind::ClickUp => Self::ClickUp(ClickUpAdapter),
            IssueProviderKind::Gitea => Self::Gitea(GiteaAdapter),
            IssueProviderKind::Redmine => Self::Redmine(RedmineAdapter),
            IssueProviderKind::OpenProject => Self::OpenProject(OpenProjectAdapter),
            IssueProviderKind::NextcloudDeck => {
                Self::NextcloudDeck(NextcloudDeckAdapter::default())
            }
            IssueProviderKind::Caldav => Self::Caldav(CaldavAdapter),
            IssueProviderKind::AzureDevOps => Self::AzureDevOps(AzureDevOpsAdapter),
            IssueProviderKind::Calendar => return None,
        };
        Some(adapter)
    }

    /// Returns the adapter as a hook table.
    #[must_use]
    pub fn hooks(&self) -> &dyn ItemBackend {
        match self {
            Self::Jira(adapter) => adapter,
            Self::GitHub(adapter) => adapter,
            Self::GitLab(adapter) => adapter,
            Self::Trello(adapter) => adapter,
            Self::Linear(adapter) => adapter,
            Self::ClickUp(adapter) => adapter,
            Self::Gitea(adapter) => adapter,
            Self::Redmine(adapter) => adapter,
            Self::OpenProject(adapter) => adapter,
            Self::NextcloudDeck(adapter) => adapter,
            Self::Caldav(adapter) => adapter,
            Self::AzureDevOps(adapter) => adapter,
        }
    }
}

/// A provider adapter bound to the API client it drives.
///
/// The variant is the backend's capability set: per-item backends fetch,
/// search and compare single items; the bulk-only calendar backend only
/// lists events.
#[derive(Clone)]
pub enum Backend {
    /// Backend with per-item operations.
    PerItem {
        /// Adapter hooks.
        adapter: ItemAdapter,
        /// API client.
        api: Arc<dyn IssueApi>,
    },
    /// Calendar feed backend.
    BulkOnly {
        /// Adapter hooks.
        adapter: CalendarAdapter,
        /// API client.
        api: Arc<dyn CalendarApi>,
    },
}

impl Backend {
    /// Binds an item adapter to its API client.
    #[must_use]
    pub const fn per_item(adapter: ItemAdapter, api: Arc<dyn IssueApi>) -> Self {
        Self::PerItem { adapter, api }
    }

    /// Binds the calendar adapter to a feed client; `clock` stamps patches.
    #[must_use]
    pub const fn calendar(
        api: Arc<dyn CalendarApi>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self::BulkOnly {
            adapter: CalendarAdapter::new(clock),
            api,
        }
    }

    /// Returns the backend kind.
    #[must_use]
    pub fn kind(&self) -> IssueProviderKind {
        match self {
            Self::PerItem { adapter, .. } => adapter.hooks().kind(),
            Self::BulkOnly { .. } => IssueProviderKind::Calendar,
        }
    }

    /// Returns the interval between background refreshes.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        match self {
            Self::PerItem { adapter, .. } => adapter.hooks().poll_interval(),
            Self::BulkOnly { .. } => IssueProviderKind::Calendar.default_poll_interval(),
        }
    }

    /// Reports a freshly resolved configuration to the adapter.
    pub fn observe_config(&self, config: &IssueProviderConfig) {
        if let Self::PerItem { adapter, .. } = self {
            adapter.hooks().observe_config(config);
        }
    }

    /// Returns whether `config` is usable for API calls.
    #[must_use]
    pub fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        match self {
            Self::PerItem { adapter, .. } => adapter.hooks().is_enabled(config),
            Self::BulkOnly { adapter, .. } => adapter.is_enabled(config),
        }
    }
}
