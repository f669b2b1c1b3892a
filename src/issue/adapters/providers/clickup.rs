//! ClickUp adapter.

use super::{BacklogSource, ItemBackend, LinkSource, text};
use crate::issue::domain::{
    IssueId, IssueProviderConfig, IssueProviderKind, ProviderSettings, RemoteIssue, TaskChanges,
};

/// ClickUp tasks. `date_updated` arrives as integer milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickUpAdapter;

const DONE_STATES: [&str; 2] = ["closed", "done"];

impl ItemBackend for ClickUpAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::ClickUp
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        let ProviderSettings::ClickUp(settings) = config.settings() else {
            return false;
        };
        config.is_enabled() && text::is_present(settings.api_key.as_ref())
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        issue.title().to_owned()
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_was_updated: Some(false),
            issue_last_updated: self.remote_marker(issue),
            is_done: Some(issue.state().is_some_and(|state| {
                DONE_STATES
                    .iter()
                    .any(|done| state.eq_ignore_ascii_case(done))
            })),
            related_to: issue.related_to().map(str::to_owned),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, _issue_id: &IssueId, _config: &IssueProviderConfig) -> LinkSource {
        LinkSource::IssueUrl
    }

    fn backlog_source(&self, _config: &IssueProviderConfig) -> BacklogSource {
        BacklogSource::Search(String::new())
    }
}
