//! Parsing and formatting helpers shared by provider adapters.

use crate::issue::domain::{
    CommentFilter, CommentStamp, FreshnessMarker, RemoteIssue, freshness::newest_comment_millis,
};
use chrono::{DateTime, NaiveDate};
use std::time::Duration;

/// Longest notification title before it is shortened.
pub const SNACK_TITLE_MAX_CHARS: usize = 32;

const ELLIPSIS: &str = "...";

/// Shortens `title` to [`SNACK_TITLE_MAX_CHARS`] characters, ending with an
/// ellipsis when anything was cut.
#[must_use]
pub fn truncate(title: &str) -> String {
    if title.chars().count() <= SNACK_TITLE_MAX_CHARS {
        return title.to_owned();
    }
    let keep = SNACK_TITLE_MAX_CHARS.saturating_sub(ELLIPSIS.len());
    let mut shortened: String = title.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

/// Parses a backend "last changed" value into epoch milliseconds.
///
/// Accepts integer milliseconds (ClickUp, Deck), RFC 3339, offsets without
/// a colon (`+0000`, Jira) and bare dates.
#[must_use]
pub fn parse_remote_millis(raw: &str) -> Option<i64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(millis) = value.parse::<i64>() {
        return Some(millis);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.timestamp_millis());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

/// Parses every comment's creation time; unparseable comments are dropped.
#[must_use]
pub fn comment_stamps(issue: &RemoteIssue) -> Vec<CommentStamp> {
    issue
        .comments()
        .iter()
        .filter_map(|comment| {
            parse_remote_millis(&comment.created_at).map(|created_millis| CommentStamp {
                author: comment.author.clone(),
                created_millis,
            })
        })
        .collect()
}

/// Freshness marker for backends that count comments as updates: the later
/// of the issue's own timestamp and its newest counted comment.
#[must_use]
pub fn activity_marker(issue: &RemoteIssue, filter: &CommentFilter) -> Option<FreshnessMarker> {
    let issue_millis = issue.updated().and_then(parse_remote_millis);
    let comment_millis = newest_comment_millis(&comment_stamps(issue), filter);
    issue_millis.max(comment_millis).map(FreshnessMarker::Timestamp)
}

/// Parses an ISO-8601 duration such as `PT2H30M` or `P1DT4H`.
///
/// Plain integers are read as milliseconds. Week, month and year
/// designators and fractional components are not supported.
#[must_use]
pub fn parse_iso_duration(raw: &str) -> Option<Duration> {
    let value = raw.trim();
    if let Ok(millis) = value.parse::<u64>() {
        return Some(Duration::from_millis(millis));
    }
    let body = value.strip_prefix('P')?;
    let mut seconds: u64 = 0;
    let mut digits = String::new();
    let mut in_time = false;
    for symbol in body.chars() {
        match symbol {
            '0'..='9' => digits.push(symbol),
            'T' if digits.is_empty() => in_time = true,
            unit => {
                let amount: u64 = digits.parse().ok()?;
                digits.clear();
                let unit_seconds = match (unit, in_time) {
                    ('D', false) => 24 * 60 * 60,
                    ('H', true) => 60 * 60,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    _ => return None,
                };
                seconds = seconds.checked_add(amount.checked_mul(unit_seconds)?)?;
            }
        }
    }
    digits.is_empty().then_some(Duration::from_secs(seconds))
}

/// Returns whether an optional setting holds a non-blank value.
#[must_use]
pub fn is_present(value: Option<&String>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}
