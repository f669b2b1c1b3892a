//! Remote item shapes returned by backend API ports.
//!
//! API clients decode each backend's wire format into these shapes. Fields
//! whose meaning differs per backend (the `updated` signal in particular)
//! are kept raw; provider adapters interpret them.

use super::{IssueId, IssueProviderId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Normalised representation of one remote issue, card or work package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteIssue {
    id: IssueId,
    title: String,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    updated: Option<String>,
    #[serde(default)]
    etag: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    comments: Vec<RemoteComment>,
    #[serde(default)]
    attachment_count: usize,
    #[serde(default)]
    story_points: Option<f64>,
    #[serde(default)]
    due_day: Option<NaiveDate>,
    #[serde(default)]
    due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    estimate: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    stack_title: Option<String>,
    #[serde(default)]
    related_to: Option<String>,
    #[serde(default)]
    raw: serde_json::Value,
}

impl RemoteIssue {
    /// Creates a remote issue with its identity and title.
    #[must_use]
    pub fn new(id: IssueId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            key: None,
            number: None,
            updated: None,
            etag: None,
            state: None,
            comments: Vec::new(),
            attachment_count: 0,
            story_points: None,
            due_day: None,
            due_at: None,
            estimate: None,
            description: None,
            url: None,
            labels: Vec::new(),
            stack_title: None,
            related_to: None,
            raw: serde_json::Value::Null,
        }
    }

    /// Sets the human key (`PROJ-12`, `ENG-4`).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the per-project issue number.
    #[must_use]
    pub const fn with_number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Sets the raw last-changed value as reported by the backend.
    #[must_use]
    pub fn with_updated(mut self, updated: impl Into<String>) -> Self {
        self.updated = Some(updated.into());
        self
    }

    /// Sets the entity tag.
    #[must_use]
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Sets the backend workflow state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the comment stream.
    #[must_use]
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = RemoteComment>) -> Self {
        self.comments = comments.into_iter().collect();
        self
    }

    /// Sets the number of attachments.
    #[must_use]
    pub const fn with_attachment_count(mut self, count: usize) -> Self {
        self.attachment_count = count;
        self
    }

    /// Sets story points.
    #[must_use]
    pub const fn with_story_points(mut self, points: f64) -> Self {
        self.story_points = Some(points);
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
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the raw estimate (ISO-8601 duration for OpenProject).
    #[must_use]
    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimate = Some(estimate.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the browser URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets label titles.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Sets the column (stack) title for board backends.
    #[must_use]
    pub fn with_stack_title(mut self, stack_title: impl Into<String>) -> Self {
        self.stack_title = Some(stack_title.into());
        self
    }

    /// Sets the parent item reference.
    #[must_use]
    pub fn with_related_to(mut self, related_to: impl Into<String>) -> Self {
        self.related_to = Some(related_to.into());
        self
    }

    /// Attaches the backend-native payload.
    #[must_use]
    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = raw;
        self
    }

    /// Returns the stable identity.
    #[must_use]
    pub const fn id(&self) -> &IssueId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the human key.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the per-project number.
    #[must_use]
    pub const fn number(&self) -> Option<u64> {
        self.number
    }

    /// Returns the raw last-changed value.
    #[must_use]
    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// Returns the entity tag.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Returns the workflow state.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Returns the comments.
    #[must_use]
    pub fn comments(&self) -> &[RemoteComment] {
        &self.comments
    }

    /// Returns the attachment count.
    #[must_use]
    pub const fn attachment_count(&self) -> usize {
        self.attachment_count
    }

    /// Returns story points.
    #[must_use]
    pub const fn story_points(&self) -> Option<f64> {
        self.story_points
    }

    /// Returns the all-day due date.
    #[must_use]
    pub const fn due_day(&self) -> Option<NaiveDate> {
        self.due_day
    }

    /// Returns the timed due date.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the raw estimate.
    #[must_use]
    pub fn estimate(&self) -> Option<&str> {
        self.estimate.as_deref()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the browser URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns label titles.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the column title.
    #[must_use]
    pub fn stack_title(&self) -> Option<&str> {
        self.stack_title.as_deref()
    }

    /// Returns the parent item reference.
    #[must_use]
    pub fn related_to(&self) -> Option<&str> {
        self.related_to.as_deref()
    }

    /// Returns the backend-native payload.
    #[must_use]
    pub const fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

/// One comment on a remote issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteComment {
    /// Login or username of the author.
    pub author: String,
    /// Raw creation timestamp (RFC 3339).
    pub created_at: String,
}

impl RemoteComment {
    /// Creates a comment record.
    #[must_use]
    pub fn new(author: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            created_at: created_at.into(),
        }
    }
}

/// Event read from a calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    id: IssueId,
    #[serde(default)]
    alternate_ids: Vec<String>,
    calendar_provider_id: IssueProviderId,
    title: String,
    start: DateTime<Utc>,
    #[serde(default)]
    is_all_day: bool,
    duration: Duration,
    #[serde(default)]
    description: Option<String>,
}

impl CalendarEvent {
    /// Creates a timed event.
    #[must_use]
    pub fn new(
        id: IssueId,
        calendar_provider_id: IssueProviderId,
        title: impl Into<String>,
        start: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            alternate_ids: Vec::new(),
            calendar_provider_id,
            title: title.into(),
            start,
            is_all_day: false,
            duration,
            description: None,
        }
    }

    /// Marks the event as an all-day event.
    #[must_use]
    pub const fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }

    /// Adds identifiers that address the same event, such as the series
    /// UID of a recurring instance.
    #[must_use]
    pub fn with_alternate_ids(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.alternate_ids = ids.into_iter().collect();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the primary identifier.
    #[must_use]
    pub const fn id(&self) -> &IssueId {
        &self.id
    }

    /// Returns the calendar this event was read from.
    #[must_use]
    pub const fn calendar_provider_id(&self) -> &IssueProviderId {
        &self.calendar_provider_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns whether the event spans whole days.
    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        self.is_all_day
    }

    /// Returns the duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether any of `candidates` addresses this event.
    #[must_use]
    pub fn matches_any_id<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        candidates.iter().any(|candidate| {
            let value = candidate.as_ref();
            self.id.as_str() == value || self.alternate_ids.iter().any(|alt| alt == value)
        })
    }
}

/// Raw remote representation carried in refresh and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RemoteItem {
    /// Issue-like item from a tracker.
    Issue(RemoteIssue),
    /// Calendar event.
    Event(CalendarEvent),
}

impl RemoteItem {
    /// Returns the item's primary identifier.
    #[must_use]
    pub const fn id(&self) -> &IssueId {
        match self {
            Self::Issue(issue) => issue.id(),
            Self::Event(event) => event.id(),
        }
    }

    /// Returns the item's title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Issue(issue) => issue.title(),
            Self::Event(event) => event.title(),
        }
    }
}
