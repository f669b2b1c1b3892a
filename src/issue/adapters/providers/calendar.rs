//! Calendar feed adapter.
//!
//! Calendar events cannot be fetched one at a time; every operation lists
//! the events of a calendar and works on that list. The adapter therefore
//! has no per-item hooks and does not implement
//! [`super::ItemBackend`].

use super::text;
use crate::issue::domain::{
    CalendarEvent, DueField, FreshnessMarker, FreshnessPolicy, IssueLink, IssueProviderConfig,
    IssueProviderKind, LocalTask, ProviderSettings, RemoteItem, SearchResultItem, TaskChanges,
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;

/// Bulk-only adapter for iCal feeds.
#[derive(Clone)]
pub struct CalendarAdapter {
    clock: Arc<dyn Clock + Send + Sync>,
}

impl fmt::Debug for CalendarAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarAdapter").finish_non_exhaustive()
    }
}

impl CalendarAdapter {
    /// Creates an adapter stamping patches with `clock`.
    #[must_use]
    pub const fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { clock }
    }

    /// Comparator used for calendar tasks.
    #[must_use]
    pub const fn freshness_policy(&self) -> FreshnessPolicy {
        FreshnessPolicy::FieldDiff
    }

    /// Returns whether the feed is configured and enabled.
    #[must_use]
    pub fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        let ProviderSettings::Calendar(settings) = config.settings() else {
            return false;
        };
        config.is_enabled() && text::is_present(settings.ical_url.as_ref())
    }

    /// Task fields derived from an event.
    ///
    /// All-day events set the due day (UTC date of the start) and clear the
    /// due time; timed events do the reverse. The duration becomes the time
    /// estimate.
    #[must_use]
    pub fn task_changes(&self, event: &CalendarEvent) -> TaskChanges {
        let (due_day, due_with_time, cleared_due) = if event.is_all_day() {
            (Some(event.start().date_naive()), None, DueField::Time)
        } else {
            (None, Some(event.start()), DueField::Day)
        };
        TaskChanges {
            issue_link: Some(IssueLink::new(
                IssueProviderKind::Calendar,
                event.calendar_provider_id().clone(),
                event.id().clone(),
            )),
            time_estimate: Some(event.duration()),
            notes: Some(event.description().unwrap_or_default().to_owned()),
            issue_was_updated: Some(false),
            issue_last_updated: Some(FreshnessMarker::Timestamp(
                self.clock.utc().timestamp_millis(),
            )),
            due_day,
            due_with_time,
            cleared_due: Some(cleared_due),
            ..TaskChanges::titled(event.title())
        }
    }

    /// Finds the event addressed by `task`'s issue link.
    #[must_use]
    pub fn find_event<'a>(
        &self,
        task: &LocalTask,
        events: &'a [CalendarEvent],
    ) -> Option<&'a CalendarEvent> {
        let issue_id = task.issue_link()?.issue_id().as_str();
        events
            .iter()
            .find(|event| event.matches_any_id(std::slice::from_ref(&issue_id)))
    }

    /// Builds the refresh patch for `task` when `event` differs from it.
    #[must_use]
    pub fn refresh_changes(&self, task: &LocalTask, event: &CalendarEvent) -> Option<TaskChanges> {
        let changes = self.task_changes(event);
        self.freshness_policy()
            .is_stale(task, None, &[], &changes)
            .then(|| changes.mark_updated())
    }

    /// Filters events whose title contains `term`, ignoring case.
    #[must_use]
    pub fn search_items(&self, events: Vec<CalendarEvent>, term: &str) -> Vec<SearchResultItem> {
        let needle = term.to_lowercase();
        events
            .into_iter()
            .filter(|event| event.title().to_lowercase().contains(&needle))
            .map(|event| SearchResultItem {
                title: event.title().to_owned(),
                issue_type: IssueProviderKind::Calendar,
                issue_data: RemoteItem::Event(event),
            })
            .collect()
    }
}
