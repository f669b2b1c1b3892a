//! GitHub adapter.

use super::{BacklogSource, ItemBackend, LinkSource, text};
use crate::issue::domain::{
    CommentFilter, FreshnessPolicy, GitHubSettings, IssueId, IssueProviderConfig,
    IssueProviderKind, ProviderSettings, RemoteIssue, TaskChanges,
};

/// Query used for backlog import when none is configured.
pub const DEFAULT_BACKLOG_QUERY: &str = "sort:updated state:open";

/// GitHub issues, titled `#number title`.
///
/// Comments count as updates unless written by the configured user; the
/// username comparison ignores case.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubAdapter;

fn settings(config: &IssueProviderConfig) -> Option<&GitHubSettings> {
    match config.settings() {
        ProviderSettings::GitHub(settings) => Some(settings),
        _ => None,
    }
}

fn comment_filter(config: &IssueProviderConfig) -> CommentFilter {
    let username = settings(config)
        .and_then(|github| github.filter_username_for_issue_updates.as_deref());
    CommentFilter::new(username, true)
}

impl ItemBackend for GitHubAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::GitHub
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        config.is_enabled()
            && settings(config).is_some_and(|github| text::is_present(github.repo.as_ref()))
    }

    fn freshness_policy(&self, config: &IssueProviderConfig) -> FreshnessPolicy {
        FreshnessPolicy::Timestamp {
            comments: Some(comment_filter(config)),
        }
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        match issue.number() {
            Some(number) => format!("#{number} {}", issue.title()),
            None => format!("#{} {}", issue.id(), issue.title()),
        }
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_was_updated: Some(false),
            issue_last_updated: text::activity_marker(issue, &comment_filter(config)),
            is_done: Some(issue.state() == Some("closed")),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, issue_id: &IssueId, config: &IssueProviderConfig) -> LinkSource {
        LinkSource::Url(
            settings(config)
                .and_then(|github| github.repo.as_deref())
                .map(|repo| format!("https://github.com/{repo}/issues/{issue_id}"))
                .unwrap_or_default(),
        )
    }

    fn backlog_source(&self, config: &IssueProviderConfig) -> BacklogSource {
        let query = settings(config)
            .and_then(|github| github.backlog_query.as_deref())
            .filter(|query| !query.trim().is_empty())
            .unwrap_or(DEFAULT_BACKLOG_QUERY);
        BacklogSource::Search(query.to_owned())
    }
}
