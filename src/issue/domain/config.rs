//! Provider configuration snapshots.
//!
//! Configurations are owned by an external store; the engine reads one
//! snapshot per operation and never writes it back.

use super::{IssueDomainError, IssueProviderId, IssueProviderKind};
use serde::{Deserialize, Serialize};

/// Snapshot of one configured backend instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueProviderConfig {
    provider_id: IssueProviderId,
    #[serde(default)]
    is_enabled: bool,
    #[serde(flatten)]
    settings: ProviderSettings,
}

impl IssueProviderConfig {
    /// Creates an enabled configuration.
    #[must_use]
    pub const fn new(provider_id: IssueProviderId, settings: ProviderSettings) -> Self {
        Self {
            provider_id,
            is_enabled: true,
            settings,
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    /// Decodes a configuration from its JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::InvalidConfig`] when the document does not
    /// describe a supported provider.
    pub fn from_json(document: &str) -> Result<Self, IssueDomainError> {
        serde_json::from_str(document)
            .map_err(|err| IssueDomainError::InvalidConfig(err.to_string()))
    }

    /// Returns the provider identifier.
    #[must_use]
    pub const fn provider_id(&self) -> &IssueProviderId {
        &self.provider_id
    }

    /// Returns whether the user enabled this provider.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Returns the backend kind, derived from the settings variant.
    #[must_use]
    pub const fn kind(&self) -> IssueProviderKind {
        self.settings.kind()
    }

    /// Returns the backend-specific settings.
    #[must_use]
    pub const fn settings(&self) -> &ProviderSettings {
        &self.settings
    }
}

/// Backend-specific settings, tagged by provider kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProviderSettings {
    /// Jira settings.
    #[serde(rename = "JIRA")]
    Jira(JiraSettings),
    /// GitHub settings.
    #[serde(rename = "GITHUB")]
    GitHub(GitHubSettings),
    /// GitLab settings.
    #[serde(rename = "GITLAB")]
    GitLab(GitLabSettings),
    /// Trello settings.
    #[serde(rename = "TRELLO")]
    Trello(TrelloSettings),
    /// Linear settings.
    #[serde(rename = "LINEAR")]
    Linear(LinearSettings),
    /// ClickUp settings.
    #[serde(rename = "CLICKUP")]
    ClickUp(ClickUpSettings),
    /// Gitea settings.
    #[serde(rename = "GITEA")]
    Gitea(GiteaSettings),
    /// Redmine settings.
    #[serde(rename = "REDMINE")]
    Redmine(RedmineSettings),
    /// OpenProject settings.
    #[serde(rename = "OPEN_PROJECT")]
    OpenProject(OpenProjectSettings),
    /// Nextcloud Deck settings.
    #[serde(rename = "NEXTCLOUD_DECK")]
    NextcloudDeck(NextcloudDeckSettings),
    /// CalDAV settings.
    #[serde(rename = "CALDAV")]
    Caldav(CaldavSettings),
    /// iCal calendar settings.
    #[serde(rename = "ICAL")]
    Calendar(CalendarSettings),
    /// Azure DevOps settings.
    #[serde(rename = "AZURE_DEVOPS")]
    AzureDevOps(AzureDevOpsSettings),
}

impl ProviderSettings {
    /// Returns the backend kind these settings belong to.
    #[must_use]
    pub const fn kind(&self) -> IssueProviderKind {
        match self {
            Self::Jira(_) => IssueProviderKind::Jira,
            Self::GitHub(_) => IssueProviderKind::GitHub,
            Self::GitLab(_) => IssueProviderKind::GitLab,
            Self::Trello(_) => IssueProviderKind::Trello,
            Self::Linear(_) => IssueProviderKind::Linear,
            Self::ClickUp(_) => IssueProviderKind::ClickUp,
            Self::Gitea(_) => IssueProviderKind::Gitea,
            Self::Redmine(_) => IssueProviderKind::Redmine,
            Self::OpenProject(_) => IssueProviderKind::OpenProject,
            Self::NextcloudDeck(_) => IssueProviderKind::NextcloudDeck,
            Self::Caldav(_) => IssueProviderKind::Caldav,
            Self::Calendar(_) => IssueProviderKind::Calendar,
            Self::AzureDevOps(_) => IssueProviderKind::AzureDevOps,
        }
    }
}

/// Jira connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JiraSettings {
    /// Server base URL.
    pub host: Option<String>,
    /// Account name.
    pub user_name: Option<String>,
    /// Password or API token.
    pub password: Option<String>,
}

/// GitHub repository settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitHubSettings {
    /// Repository in `owner/repo` form.
    pub repo: Option<String>,
    /// Personal access token.
    pub token: Option<String>,
    /// Comments by this user do not count as remote updates.
    pub filter_username_for_issue_updates: Option<String>,
    /// Search query used for backlog import.
    pub backlog_query: Option<String>,
}

/// GitLab project settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitLabSettings {
    /// Project path, for example `group/project`.
    pub project: Option<String>,
    /// Self-hosted instance URL; `gitlab.com` when absent.
    pub gitlab_base_url: Option<String>,
    /// Personal access token.
    pub token: Option<String>,
    /// Comments by this user do not count as remote updates.
    pub filter_username: Option<String>,
}

/// Trello board settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrelloSettings {
    /// API key.
    pub api_key: Option<String>,
    /// User token.
    pub token: Option<String>,
    /// Board identifier.
    pub board_id: Option<String>,
}

/// Linear workspace settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinearSettings {
    /// API key.
    pub api_key: Option<String>,
}

/// ClickUp workspace settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClickUpSettings {
    /// API key.
    pub api_key: Option<String>,
}

/// Gitea repository settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiteaSettings {
    /// Server base URL.
    pub host: Option<String>,
    /// Access token.
    pub token: Option<String>,
    /// Repository in `owner/repo` form.
    pub repo_full_name: Option<String>,
}

/// Redmine project settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedmineSettings {
    /// Server base URL.
    pub host: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Project identifier.
    pub project_id: Option<String>,
}

/// OpenProject project settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenProjectSettings {
    /// Server base URL.
    pub host: Option<String>,
    /// API token.
    pub token: Option<String>,
    /// Project identifier.
    pub project_id: Option<String>,
}

/// Nextcloud Deck board settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextcloudDeckSettings {
    /// Nextcloud instance URL.
    pub nextcloud_base_url: Option<String>,
    /// Account name.
    pub username: Option<String>,
    /// App password.
    pub password: Option<String>,
    /// Board the cards are imported from.
    pub selected_board_id: Option<u64>,
    /// Display title of the selected board.
    pub selected_board_title: Option<String>,
    /// Task title template with `{CARD_TITLE}`, `{COLUMN}`, `{BOARD}`,
    /// `{ID}` and `{LABELS}` placeholders.
    pub title_template: Option<String>,
    /// User override of the polling interval.
    pub poll_interval_minutes: Option<u32>,
}

/// CalDAV collection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaldavSettings {
    /// Server URL.
    pub caldav_url: Option<String>,
    /// Calendar resource name.
    pub resource_name: Option<String>,
    /// Account name.
    pub username: Option<String>,
    /// Account password.
    pub password: Option<String>,
}

/// iCal feed settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarSettings {
    /// Feed URL.
    pub ical_url: Option<String>,
}

/// Azure DevOps project settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureDevOpsSettings {
    /// Organization name.
    pub organization: Option<String>,
    /// Project name.
    pub project: Option<String>,
    /// Personal access token.
    pub token: Option<String>,
}
