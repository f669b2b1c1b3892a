//! Azure DevOps adapter.

use super::{ItemBackend, LinkSource};
use crate::issue::domain::{
    IssueId, IssueProviderConfig, IssueProviderKind, RemoteIssue, TaskChanges,
};

/// Azure DevOps work items. Only the enabled flag gates API use; links come
/// from the work item.
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureDevOpsAdapter;

impl ItemBackend for AzureDevOpsAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::AzureDevOps
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        config.is_enabled() && config.kind() == IssueProviderKind::AzureDevOps
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        issue.title().to_owned()
    }

    fn snack_title(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> String {
        self.issue_title(issue, config)
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_was_updated: Some(false),
            issue_last_updated: self.remote_marker(issue),
            due_with_time: issue.due_at(),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, _issue_id: &IssueId, _config: &IssueProviderConfig) -> LinkSource {
        LinkSource::IssueUrl
    }
}
