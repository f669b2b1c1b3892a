//! OpenProject adapter.

use super::{ItemBackend, LinkSource, text};
use crate::issue::domain::{
    IssueId, IssueProviderConfig, IssueProviderKind, OpenProjectSettings, ProviderSettings,
    RemoteIssue, TaskChanges,
};

/// OpenProject work packages, titled `#id subject`.
///
/// The start date becomes the due day and the ISO-8601 estimate becomes the
/// time estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenProjectAdapter;

fn settings(config: &IssueProviderConfig) -> Option<&OpenProjectSettings> {
    match config.settings() {
        ProviderSettings::OpenProject(settings) => Some(settings),
        _ => None,
    }
}

impl ItemBackend for OpenProjectAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::OpenProject
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        config.is_enabled()
            && settings(config).is_some_and(|open_project| {
                text::is_present(open_project.host.as_ref())
                    && text::is_present(open_project.token.as_ref())
                    && text::is_present(open_project.project_id.as_ref())
            })
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        format!("#{} {}", issue.id(), issue.title())
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        let time_estimate = issue
            .estimate()
            .and_then(text::parse_iso_duration)
            .filter(|estimate| !estimate.is_zero());
        TaskChanges {
            issue_points: issue.story_points().filter(|points| points.is_normal()),
            issue_was_updated: Some(false),
            due_day: issue.due_day(),
            issue_last_updated: self.remote_marker(issue),
            time_estimate,
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, issue_id: &IssueId, config: &IssueProviderConfig) -> LinkSource {
        let url = settings(config)
            .and_then(|open_project| {
                Some((
                    open_project.host.as_deref()?,
                    open_project.project_id.as_deref()?,
                ))
            })
            .map(|(host, project)| format!("{host}/projects/{project}/work_packages/{issue_id}"))
            .unwrap_or_default();
        LinkSource::Url(url)
    }
}
