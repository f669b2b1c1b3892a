//! GitLab adapter.

use super::{ItemBackend, LinkSource, text};
use crate::issue::domain::{
    CommentFilter, FreshnessPolicy, GitLabSettings, IssueId, IssueProviderConfig,
    IssueProviderKind, ProviderSettings, RemoteIssue, TaskChanges,
};

/// Instance used when no base URL is configured.
pub const GITLAB_BASE_URL: &str = "https://gitlab.com/";

/// GitLab issues, titled `#number title`.
///
/// Comments count as updates unless written by the configured user; the
/// username must match exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabAdapter;

fn settings(config: &IssueProviderConfig) -> Option<&GitLabSettings> {
    match config.settings() {
        ProviderSettings::GitLab(settings) => Some(settings),
        _ => None,
    }
}

/// Strips project prefixes such as `group/repo#123` or `#123` from an
/// issue identifier.
fn issue_number(issue_id: &IssueId) -> &str {
    let raw = issue_id.as_str();
    raw.rsplit_once('#').map_or(raw, |(_, number)| number)
}

fn comment_filter(config: &IssueProviderConfig) -> CommentFilter {
    let username = settings(config).and_then(|gitlab| gitlab.filter_username.as_deref());
    CommentFilter::new(username, false)
}

impl ItemBackend for GitLabAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::GitLab
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        config.is_enabled()
            && settings(config).is_some_and(|gitlab| text::is_present(gitlab.project.as_ref()))
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
            issue_points: issue.story_points(),
            issue_was_updated: Some(false),
            issue_last_updated: text::activity_marker(issue, &comment_filter(config)),
            is_done: Some(issue.state() == Some("closed")),
            due_day: issue.due_day(),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, issue_id: &IssueId, config: &IssueProviderConfig) -> LinkSource {
        let Some(gitlab) = settings(config) else {
            return LinkSource::Url(String::new());
        };
        let Some(project) = gitlab.project.as_deref().filter(|project| !project.is_empty())
        else {
            return LinkSource::Url(String::new());
        };
        let base = match gitlab.gitlab_base_url.as_deref() {
            Some(url) if url.ends_with('/') => url.to_owned(),
            Some(url) if !url.is_empty() => format!("{url}/"),
            _ => GITLAB_BASE_URL.to_owned(),
        };
        LinkSource::Url(format!(
            "{base}{project}/-/issues/{}",
            issue_number(issue_id)
        ))
    }
}
