//! Shared builders for issue provider tests.

use crate::issue::domain::{
    CalendarSettings, GitHubSettings, IssueId, IssueLink, IssueProviderConfig, IssueProviderId,
    IssueProviderKind, LocalTask, ProviderSettings, TaskId,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self(
            Utc.timestamp_millis_opt(millis)
                .single()
                .expect("valid timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn provider_id(raw: &str) -> IssueProviderId {
    IssueProviderId::new(raw).expect("valid provider id")
}

pub fn issue_id(raw: &str) -> IssueId {
    IssueId::new(raw).expect("valid issue id")
}

pub fn github_config(provider: &str) -> IssueProviderConfig {
    IssueProviderConfig::new(
        provider_id(provider),
        ProviderSettings::GitHub(GitHubSettings {
            repo: Some("acme/widgets".to_owned()),
            ..GitHubSettings::default()
        }),
    )
}

pub fn calendar_config(provider: &str) -> IssueProviderConfig {
    IssueProviderConfig::new(
        provider_id(provider),
        ProviderSettings::Calendar(CalendarSettings {
            ical_url: Some("https://calendar.example/feed.ics".to_owned()),
        }),
    )
}

pub fn linked_task(kind: IssueProviderKind, provider: &str, issue: &str) -> LocalTask {
    LocalTask::new(TaskId::new(), format!("task for {issue}")).with_issue_link(IssueLink::new(
        kind,
        provider_id(provider),
        issue_id(issue),
    ))
}

pub fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}
