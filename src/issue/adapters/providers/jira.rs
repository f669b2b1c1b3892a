//! Jira adapter.

use super::{ItemBackend, LinkSource, text};
use crate::issue::domain::{
    IssueId, IssueProviderConfig, IssueProviderKind, ProviderSettings, RemoteIssue, TaskChanges,
};

/// Jira issues, titled `KEY summary`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JiraAdapter;

impl ItemBackend for JiraAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::Jira
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        let ProviderSettings::Jira(settings) = config.settings() else {
            return false;
        };
        config.is_enabled()
            && text::is_present(settings.host.as_ref())
            && text::is_present(settings.user_name.as_ref())
            && text::is_present(settings.password.as_ref())
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        match issue.key() {
            Some(key) => format!("{key} {}", issue.title()),
            None => issue.title().to_owned(),
        }
    }

    fn snack_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        issue.key().unwrap_or_else(|| issue.title()).to_owned()
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_points: issue.story_points(),
            issue_attachment_count: Some(issue.attachment_count()),
            issue_was_updated: Some(false),
            issue_last_updated: self.remote_marker(issue),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, issue_id: &IssueId, config: &IssueProviderConfig) -> LinkSource {
        let host = match config.settings() {
            ProviderSettings::Jira(settings) => settings.host.as_deref(),
            _ => None,
        };
        LinkSource::Url(
            host.map(|base| format!("{base}/browse/{issue_id}"))
                .unwrap_or_default(),
        )
    }
}
