//! Trello adapter.

use super::{ItemBackend, LinkSource, text};
use crate::issue::domain::{
    IssueId, IssueProviderConfig, IssueProviderKind, ProviderSettings, RemoteIssue, TaskChanges,
};

/// Trello cards. Card links are only known to the API.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrelloAdapter;

impl ItemBackend for TrelloAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::Trello
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        let ProviderSettings::Trello(settings) = config.settings() else {
            return false;
        };
        config.is_enabled()
            && text::is_present(settings.api_key.as_ref())
            && text::is_present(settings.token.as_ref())
            && text::is_present(settings.board_id.as_ref())
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        match issue.key() {
            Some(key) => format!("{key} {}", issue.title()),
            None => issue.title().to_owned(),
        }
    }

    fn snack_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        issue.title().to_owned()
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

    fn link(&self, _issue_id: &IssueId, _config: &IssueProviderConfig) -> LinkSource {
        LinkSource::ApiLookup
    }
}
