//! Local task fields read by the engine and the patches it produces.

use super::{FreshnessMarker, IssueId, IssueProviderId, IssueProviderKind, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Binding between a local task and one remote issue.
///
/// Provider and issue identifiers only exist together, so a task is either
/// fully linked or not linked at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    issue_type: IssueProviderKind,
    provider_id: IssueProviderId,
    issue_id: IssueId,
}

impl IssueLink {
    /// Creates a link from validated parts.
    #[must_use]
    pub const fn new(
        issue_type: IssueProviderKind,
        provider_id: IssueProviderId,
        issue_id: IssueId,
    ) -> Self {
        Self {
            issue_type,
            provider_id,
            issue_id,
        }
    }

    /// Returns the backend kind.
    #[must_use]
    pub const fn issue_type(&self) -> IssueProviderKind {
        self.issue_type
    }

    /// Returns the provider instance identifier.
    #[must_use]
    pub const fn provider_id(&self) -> &IssueProviderId {
        &self.provider_id
    }

    /// Returns the remote issue identifier.
    #[must_use]
    pub const fn issue_id(&self) -> &IssueId {
        &self.issue_id
    }
}

/// Snapshot of a task owned by the external task store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTask {
    id: TaskId,
    title: String,
    #[serde(default)]
    issue_link: Option<IssueLink>,
    #[serde(default)]
    issue_last_updated: Option<FreshnessMarker>,
    #[serde(default)]
    issue_was_updated: bool,
    #[serde(default)]
    is_done: bool,
    #[serde(default)]
    due_day: Option<NaiveDate>,
    #[serde(default)]
    due_with_time: Option<DateTime<Utc>>,
    #[serde(default)]
    time_estimate: Option<Duration>,
    #[serde(default)]
    notes: Option<String>,
}

impl LocalTask {
    /// Creates an unlinked task.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            issue_link: None,
            issue_last_updated: None,
            issue_was_updated: false,
            is_done: false,
            due_day: None,
            due_with_time: None,
            time_estimate: None,
            notes: None,
        }
    }

    /// Binds the task to a remote issue.
    #[must_use]
    pub fn with_issue_link(mut self, link: IssueLink) -> Self {
        self.issue_link = Some(link);
        self
    }

    /// Sets the last observed freshness marker.
    #[must_use]
    pub fn with_issue_last_updated(mut self, marker: FreshnessMarker) -> Self {
        self.issue_last_updated = Some(marker);
        self
    }

    /// Sets the all-day due date.
    #[must_use]
    pub const fn with_due_day(mut self, day: NaiveDate) -> Self {
        self.due_day = Some(day);
        self
    }

    /// Sets the timed due date.
    #[must_use]
    pub const fn with_due_with_time(mut self, due: DateTime<Utc>) -> Self {
        self.due_with_time = Some(due);
        self
    }

    /// Sets the time estimate.
    #[must_use]
    pub const fn with_time_estimate(mut self, estimate: Duration) -> Self {
        self.time_estimate = Some(estimate);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the issue link, if any.
    #[must_use]
    pub const fn issue_link(&self) -> Option<&IssueLink> {
        self.issue_link.as_ref()
    }

    /// Returns the last observed freshness marker.
    #[must_use]
    pub const fn issue_last_updated(&self) -> Option<&FreshnessMarker> {
        self.issue_last_updated.as_ref()
    }

    /// Returns whether the remote issue changed since the user last looked.
    #[must_use]
    pub const fn issue_was_updated(&self) -> bool {
        self.issue_was_updated
    }

    /// Returns the done flag.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.is_done
    }

    /// Returns the all-day due date.
    #[must_use]
    pub const fn due_day(&self) -> Option<NaiveDate> {
        self.due_day
    }

    /// Returns the timed due date.
    #[must_use]
    pub const fn due_with_time(&self) -> Option<DateTime<Utc>> {
        self.due_with_time
    }

    /// Returns the time estimate.
    #[must_use]
    pub const fn time_estimate(&self) -> Option<Duration> {
        self.time_estimate
    }

    /// Returns the notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns a copy with `changes` applied.
    ///
    /// The engine never calls this; task stores use it to apply a patch in
    /// one step.
    #[must_use]
    pub fn apply_changes(&self, changes: &TaskChanges) -> Self {
        let mut next = self.clone();
        if let Some(title) = &changes.title {
            next.title.clone_from(title);
        }
        if let Some(link) = &changes.issue_link {
            next.issue_link = Some(link.clone());
        }
        if let Some(marker) = &changes.issue_last_updated {
            next.issue_last_updated = Some(marker.clone());
        }
        if let Some(flag) = changes.issue_was_updated {
            next.issue_was_updated = flag;
        }
        if let Some(done) = changes.is_done {
            next.is_done = done;
        }
        if changes.due_day.is_some() {
            next.due_day = changes.due_day;
        }
        if changes.due_with_time.is_some() {
            next.due_with_time = changes.due_with_time;
        }
        match changes.cleared_due {
            Some(DueField::Day) => next.due_day = None,
            Some(DueField::Time) => next.due_with_time = None,
            None => {}
        }
        if changes.time_estimate.is_some() {
            next.time_estimate = changes.time_estimate;
        }
        if let Some(notes) = &changes.notes {
            next.notes = Some(notes.clone());
        }
        next
    }
}

/// One of the two mutually exclusive due fields of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueField {
    /// All-day due date.
    Day,
    /// Timed due date.
    Time,
}

/// Partial field patch for a local task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New or corrected issue link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_link: Option<IssueLink>,
    /// Freshness marker of the remote state this patch was built from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_last_updated: Option<FreshnessMarker>,
    /// Remote-changed flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_was_updated: Option<bool>,
    /// Story points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_points: Option<f64>,
    /// Number of remote attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_attachment_count: Option<usize>,
    /// Done flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    /// All-day due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_day: Option<NaiveDate>,
    /// Timed due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_with_time: Option<DateTime<Utc>>,
    /// Due field removed from the task. `due_day` and `due_with_time`
    /// cannot express removal on their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared_due: Option<DueField>,
    /// Time estimate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<Duration>,
    /// Notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Parent item reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_to: Option<String>,
}

impl TaskChanges {
    /// Creates a patch that only sets the title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Returns the patch flagged as a remote update.
    #[must_use]
    pub fn mark_updated(mut self) -> Self {
        self.issue_was_updated = Some(true);
        self
    }
}
