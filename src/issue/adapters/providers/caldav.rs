//! CalDAV adapter.

use super::{BulkRefresh, ItemBackend, LinkSource, text};
use crate::issue::domain::{
    FreshnessMarker, FreshnessPolicy, IssueId, IssueProviderConfig, IssueProviderKind,
    ProviderSettings, RemoteIssue, TaskChanges,
};

/// CalDAV todos, compared by entity tag and refreshed in bulk by id.
///
/// Todos have no browser page, so links are always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaldavAdapter;

impl ItemBackend for CaldavAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::Caldav
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        let ProviderSettings::Caldav(settings) = config.settings() else {
            return false;
        };
        config.is_enabled()
            && text::is_present(settings.caldav_url.as_ref())
            && text::is_present(settings.resource_name.as_ref())
            && text::is_present(settings.username.as_ref())
            && text::is_present(settings.password.as_ref())
    }

    fn freshness_policy(&self, _config: &IssueProviderConfig) -> FreshnessPolicy {
        FreshnessPolicy::Identity
    }

    fn remote_marker(&self, issue: &RemoteIssue) -> Option<FreshnessMarker> {
        issue
            .etag()
            .map(|etag| FreshnessMarker::Identity(etag.to_owned()))
    }

    fn issue_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        issue.title().to_owned()
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_last_updated: self.remote_marker(issue),
            notes: issue.description().map(str::to_owned),
            due_with_time: issue.due_at(),
            related_to: issue.related_to().map(str::to_owned),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn link(&self, _issue_id: &IssueId, _config: &IssueProviderConfig) -> LinkSource {
        LinkSource::Url(String::new())
    }

    fn bulk_refresh(&self) -> BulkRefresh {
        BulkRefresh::ByIds
    }
}
