//! Freshness comparators.
//!
//! A comparator decides whether a local task's record of a remote issue is
//! out of date. Every backend uses exactly one of three policies, chosen when
//! its adapter is built:
//!
//! - timestamp comparison, optionally widened by a comment stream,
//! - identity comparison on an opaque token (etag, revision),
//! - field comparison of the would-be patch against the task (calendars).
//!
//! All functions here are pure: the same inputs always give the same verdict.

use super::{LocalTask, TaskChanges};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Freshness signal stored on a task after a refresh.
///
/// The task store treats the value as opaque; only the comparator that
/// produced it interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FreshnessMarker {
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    /// Opaque identity token such as an etag.
    Identity(String),
}

impl FreshnessMarker {
    /// Returns the timestamp, if this marker is one.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<i64> {
        match self {
            Self::Timestamp(millis) => Some(*millis),
            Self::Identity(_) => None,
        }
    }
}

impl fmt::Display for FreshnessMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp(millis) => write!(f, "{millis}"),
            Self::Identity(token) => f.write_str(token),
        }
    }
}

/// Comparator variant used by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreshnessPolicy {
    /// Newer remote timestamp means stale. When a comment policy is set,
    /// a newer comment also means stale.
    Timestamp {
        /// Comment stream handling; `None` ignores comments.
        comments: Option<CommentFilter>,
    },
    /// Any change of the identity token means stale.
    Identity,
    /// Any difference between the would-be patch and the task means stale.
    FieldDiff,
}

impl FreshnessPolicy {
    /// Decides whether `task` is out of date.
    ///
    /// `remote` is the freshness marker extracted from the remote item,
    /// `comments` its parsed comment stream, and `changes` the patch that
    /// would be applied; each policy reads only the inputs it needs. A
    /// remote item without a parseable timestamp is never stale under the
    /// timestamp policy.
    #[must_use]
    pub fn is_stale(
        &self,
        task: &LocalTask,
        remote: Option<&FreshnessMarker>,
        comments: &[CommentStamp],
        changes: &TaskChanges,
    ) -> bool {
        let stored = task.issue_last_updated();
        let remote_millis = remote.and_then(FreshnessMarker::as_timestamp);
        match self {
            Self::Timestamp { comments: None } => {
                remote_millis.is_some_and(|millis| is_stale_by_timestamp(stored, millis))
            }
            Self::Timestamp {
                comments: Some(filter),
            } => is_stale_with_comments(stored, remote_millis, comments, filter),
            Self::Identity => is_stale_by_identity(stored, remote),
            Self::FieldDiff => fields_differ(task, changes),
        }
    }
}

/// Excludes one user's comments from the comment-derived timestamp so the
/// user's own activity does not count as an external update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFilter {
    username: Option<String>,
    case_insensitive: bool,
}

impl CommentFilter {
    /// Shortest username that activates filtering.
    pub const MIN_USERNAME_LEN: usize = 2;

    /// Creates a filter; blank or too-short names disable filtering.
    #[must_use]
    pub fn new(filter_username: Option<&str>, case_insensitive: bool) -> Self {
        let username = filter_username
            .map(str::trim)
            .filter(|name| name.chars().count() >= Self::MIN_USERNAME_LEN)
            .map(|name| {
                if case_insensitive {
                    name.to_lowercase()
                } else {
                    name.to_owned()
                }
            });
        Self {
            username,
            case_insensitive,
        }
    }

    /// Returns a filter that keeps every comment.
    #[must_use]
    pub const fn keep_all() -> Self {
        Self {
            username: None,
            case_insensitive: false,
        }
    }

    /// Returns whether filtering is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.username.is_some()
    }

    fn excludes(&self, author: &str) -> bool {
        match &self.username {
            Some(name) if self.case_insensitive => author.to_lowercase() == *name,
            Some(name) => author == name,
            None => false,
        }
    }
}

/// Parsed comment creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStamp {
    /// Author login.
    pub author: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_millis: i64,
}

/// Returns whether a remote timestamp is newer than the stored marker.
///
/// A missing or non-timestamp stored marker counts as zero.
#[must_use]
pub fn is_stale_by_timestamp(stored: Option<&FreshnessMarker>, remote_millis: i64) -> bool {
    let last_seen = stored.and_then(FreshnessMarker::as_timestamp).unwrap_or(0);
    remote_millis > last_seen
}

/// Returns whether the remote identity token differs from the stored one.
///
/// There is no ordering: a token that moves backwards is still a change, and
/// so is a token that disappeared.
#[must_use]
pub fn is_stale_by_identity(
    stored: Option<&FreshnessMarker>,
    remote: Option<&FreshnessMarker>,
) -> bool {
    stored != remote
}

/// Returns the newest comment time after applying `filter`.
///
/// If the filter would remove every comment, the unfiltered stream is used.
#[must_use]
pub fn newest_comment_millis(comments: &[CommentStamp], filter: &CommentFilter) -> Option<i64> {
    let by_others = comments
        .iter()
        .filter(|comment| !filter.excludes(&comment.author))
        .map(|comment| comment.created_millis)
        .max();
    by_others.or_else(|| comments.iter().map(|comment| comment.created_millis).max())
}

/// Timestamp comparison widened by a comment stream: stale when either the
/// issue itself or its newest counted comment is newer than the stored
/// marker.
#[must_use]
pub fn is_stale_with_comments(
    stored: Option<&FreshnessMarker>,
    issue_millis: Option<i64>,
    comments: &[CommentStamp],
    filter: &CommentFilter,
) -> bool {
    let comment_is_newer = newest_comment_millis(comments, filter)
        .is_some_and(|newest| is_stale_by_timestamp(stored, newest));
    comment_is_newer || issue_millis.is_some_and(|millis| is_stale_by_timestamp(stored, millis))
}

/// Field comparison used by calendar backends.
///
/// Only the fields a calendar event controls take part: timed due date,
/// all-day due date, title and duration.
#[must_use]
pub fn fields_differ(task: &LocalTask, changes: &TaskChanges) -> bool {
    changes.due_with_time != task.due_with_time()
        || changes.due_day != task.due_day()
        || changes.title.as_deref() != Some(task.title())
        || changes.time_estimate != task.time_estimate()
}
