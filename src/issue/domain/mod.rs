//! Domain model for issue provider synchronization.
//!
//! The domain describes provider configuration snapshots, remote issue
//! shapes, the local task fields the engine reads, and the pure freshness
//! comparators. Nothing here performs I/O.

mod config;
mod error;
pub mod freshness;
mod ids;
mod kind;
mod refresh;
mod remote;
mod task;

pub use config::{
    AzureDevOpsSettings, CaldavSettings, CalendarSettings, ClickUpSettings, GiteaSettings,
    GitHubSettings, GitLabSettings, IssueProviderConfig, JiraSettings, LinearSettings,
    NextcloudDeckSettings, OpenProjectSettings, ProviderSettings, RedmineSettings,
    TrelloSettings,
};
pub use error::IssueDomainError;
pub use freshness::{CommentFilter, CommentStamp, FreshnessMarker, FreshnessPolicy};
pub use ids::{IssueId, IssueProviderId, TaskId};
pub use kind::IssueProviderKind;
pub use refresh::{IssueUpdate, RefreshResult, SearchResultItem};
pub use remote::{CalendarEvent, RemoteComment, RemoteIssue, RemoteItem};
pub use task::{DueField, IssueLink, LocalTask, TaskChanges};
