//! Gitea adapter.

use super::{ItemBackend, LinkSource, text};
use crate::issue::domain::{
    GiteaSettings, IssueId, IssueProviderConfig, IssueProviderKind, ProviderSettings,
    RemoteIssue, TaskChanges,
};

/// Gitea issues, titled `#number title`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GiteaAdapter;

fn settings(config: &IssueProviderConfig) -> Option<&GiteaSettings> {
    match config.settings() {
        ProviderSettings::Gitea(settings) => Some(settings),
        _ => None,
    }
}

impl ItemBackend for GiteaAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::Gitea
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        config.is_enabled()
            && settings(config).is_some_and(|gitea| {
                text::is_present(gitea.host.as_ref())
                    && text::is_present(gitea.token.as_ref())
                    && text::is_present(gitea.repo_full_name.as_ref())
            })
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        match issue.number() {
            Some(number) => format!("#{number} {}", issue.title()),
            None => issue.title().to_owned(),
        }
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_was_updated: Some(false),
            issue_last_updated: self.remote_marker(issue),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, issue_id: &IssueId, config: &IssueProviderConfig) -> LinkSource {
        let url = settings(config)
            .and_then(|gitea| Some((gitea.host.as_deref()?, gitea.repo_full_name.as_deref()?)))
            .map(|(host, repo)| format!("{host}/{repo}/issues/{issue_id}"))
            .unwrap_or_default();
        LinkSource::Url(url)
    }
}
