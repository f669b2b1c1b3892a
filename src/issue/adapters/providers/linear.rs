//! Linear adapter.

use super::{BacklogSource, ItemBackend, LinkSource, text};
use crate::issue::domain::{
    IssueId, IssueProviderConfig, IssueProviderKind, ProviderSettings, RemoteIssue, TaskChanges,
};

/// Linear issues, titled `IDENTIFIER title`. Links come from the issue.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearAdapter;

/// Workflow state types that close an issue.
const DONE_STATES: [&str; 2] = ["completed", "canceled"];

impl ItemBackend for LinearAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::Linear
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        let ProviderSettings::Linear(settings) = config.settings() else {
            return false;
        };
        config.is_enabled() && text::is_present(settings.api_key.as_ref())
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        match issue.key() {
            Some(identifier) => format!("{identifier} {}", issue.title()),
            None => issue.title().to_owned(),
        }
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_was_updated: Some(false),
            issue_last_updated: self.remote_marker(issue),
            is_done: Some(issue.state().is_some_and(|state| DONE_STATES.contains(&state))),
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
