//! Supported backend kinds.

use super::IssueDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);

/// Supported external issue providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueProviderKind {
    /// Atlassian Jira.
    Jira,
    /// GitHub issues.
    #[serde(rename = "GITHUB")]
    GitHub,
    /// GitLab issues.
    #[serde(rename = "GITLAB")]
    GitLab,
    /// Trello cards.
    Trello,
    /// Linear issues.
    Linear,
    /// ClickUp tasks.
    #[serde(rename = "CLICKUP")]
    ClickUp,
    /// Gitea issues.
    Gitea,
    /// Redmine issues.
    Redmine,
    /// OpenProject work packages.
    OpenProject,
    /// Nextcloud Deck cards.
    NextcloudDeck,
    /// CalDAV todos.
    Caldav,
    /// iCal calendar feeds.
    #[serde(rename = "ICAL")]
    Calendar,
    /// Azure DevOps work items.
    #[serde(rename = "AZURE_DEVOPS")]
    AzureDevOps,
}

impl IssueProviderKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Jira,
        Self::GitHub,
        Self::GitLab,
        Self::Trello,
        Self::Linear,
        Self::ClickUp,
        Self::Gitea,
        Self::Redmine,
        Self::OpenProject,
        Self::NextcloudDeck,
        Self::Caldav,
        Self::Calendar,
        Self::AzureDevOps,
    ];

    /// Returns the kind in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jira => "JIRA",
            Self::GitHub => "GITHUB",
            Self::GitLab => "GITLAB",
            Self::Trello => "TRELLO",
            Self::Linear => "LINEAR",
            Self::ClickUp => "CLICKUP",
            Self::Gitea => "GITEA",
            Self::Redmine => "REDMINE",
            Self::OpenProject => "OPEN_PROJECT",
            Self::NextcloudDeck => "NEXTCLOUD_DECK",
            Self::Caldav => "CALDAV",
            Self::Calendar => "ICAL",
            Self::AzureDevOps => "AZURE_DEVOPS",
        }
    }

    /// Returns the backend's default polling interval.
    ///
    /// Nextcloud Deck may override this per configuration; see
    /// [`super::NextcloudDeckSettings::poll_interval_minutes`].
    #[must_use]
    pub const fn default_poll_interval(self) -> Duration {
        match self {
            Self::ClickUp | Self::AzureDevOps => MINUTE,
            Self::Calendar => Duration::from_secs(2 * 60 * 60),
            Self::Jira
            | Self::GitHub
            | Self::GitLab
            | Self::Trello
            | Self::Linear
            | Self::Gitea
            | Self::Redmine
            | Self::OpenProject
            | Self::NextcloudDeck
            | Self::Caldav => Duration::from_secs(5 * 60),
        }
    }
}

impl TryFrom<&str> for IssueProviderKind {
    type Error = IssueDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| IssueDomainError::InvalidProviderKind(value.to_owned()))
    }
}

impl fmt::Display for IssueProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
