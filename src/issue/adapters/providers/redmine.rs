//! Redmine adapter.

use super::{ItemBackend, LinkSource, text};
use crate::issue::domain::{
    IssueId, IssueProviderConfig, IssueProviderKind, ProviderSettings, RedmineSettings,
    RemoteIssue, TaskChanges,
};

/// Redmine issues, titled `#id subject`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedmineAdapter;

fn settings(config: &IssueProviderConfig) -> Option<&RedmineSettings> {
    match config.settings() {
        ProviderSettings::Redmine(settings) => Some(settings),
        _ => None,
    }
}

impl ItemBackend for RedmineAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::Redmine
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        config.is_enabled()
            && settings(config).is_some_and(|redmine| {
                text::is_present(redmine.host.as_ref())
                    && text::is_present(redmine.api_key.as_ref())
                    && text::is_present(redmine.project_id.as_ref())
            })
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        format!("#{} {}", issue.id(), issue.title())
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_was_updated: Some(false),
            issue_last_updated: self.remote_marker(issue),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, issue_id: &IssueId, config: &IssueProviderConfig) -> LinkSource {
        LinkSource::Url(
            settings(config)
                .and_then(|redmine| redmine.host.as_deref())
                .map(|host| format!("{host}/issues/{issue_id}"))
                .unwrap_or_default(),
        )
    }
}
