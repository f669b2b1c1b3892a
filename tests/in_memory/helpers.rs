//! Shared builders for the sync integration tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use issue_sync::issue::{
    adapters::{
        memory::{InMemoryCalendarApi, InMemoryConfigStore, InMemoryIssueApi},
        providers::{Backend, ItemAdapter},
    },
    domain::{
        CalendarEvent, CalendarSettings, GitHubSettings, IssueId, IssueLink, IssueProviderConfig,
        IssueProviderId, IssueProviderKind, LocalTask, NextcloudDeckSettings, ProviderSettings,
        TaskId,
    },
    services::{IssueProviderService, ProviderRegistry},
};
use issue_sync::sync::domain::{RepeatCfgId, RepeatUnit, TaskRepeatCfg};
use mockable::Clock;
use rstest::fixture;

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at noon UTC of `day`.
    pub fn on(day: NaiveDate) -> Self {
        let noon = day.and_hms_opt(12, 0, 0).expect("valid time");
        Self(Utc.from_utc_datetime(&noon))
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

/// Parses a `YYYY-MM-DD` day.
pub fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}

/// Parses an RFC 3339 instant.
pub fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

/// Builds a daily repeat configuration last used on `last`.
pub fn daily(id: &str, last: &str) -> TaskRepeatCfg {
    TaskRepeatCfg::new(
        RepeatCfgId::new(id).expect("valid repeat cfg id"),
        format!("repeat {id}"),
        1,
        RepeatUnit::Day,
    )
    .expect("valid repeat cfg")
    .with_last_task_creation(day(last))
}

/// Builds a task linked to `issue` of `provider`.
pub fn linked_task(kind: IssueProviderKind, provider: &str, issue: &str) -> LocalTask {
    LocalTask::new(TaskId::new(), format!("task for {issue}")).with_issue_link(IssueLink::new(
        kind,
        IssueProviderId::new(provider).expect("valid provider id"),
        IssueId::new(issue).expect("valid issue id"),
    ))
}

/// Builds an all-day calendar event.
pub fn all_day_event(calendar: &str, id: &str, start: &str) -> CalendarEvent {
    CalendarEvent::new(
        IssueId::new(id).expect("valid issue id"),
        IssueProviderId::new(calendar).expect("valid provider id"),
        format!("event {id}"),
        utc(start),
        Duration::from_secs(30 * 60),
    )
    .all_day()
}

/// Registry with one GitHub, one Deck and one calendar provider.
pub struct Providers {
    /// Registry under test.
    pub registry: Arc<ProviderRegistry<InMemoryConfigStore>>,
    /// GitHub API double.
    pub github: Arc<InMemoryIssueApi>,
    /// Deck API double.
    pub deck: Arc<InMemoryIssueApi>,
    /// Calendar feed double.
    pub calendar: Arc<InMemoryCalendarApi>,
}

/// Provides a registry wired to in-memory backends.
#[fixture]
pub fn providers() -> Providers {
    let store = Arc::new(InMemoryConfigStore::new());
    for (provider, settings) in [
        (
            "gh",
            ProviderSettings::GitHub(GitHubSettings {
                repo: Some("acme/widgets".to_owned()),
                ..GitHubSettings::default()
            }),
        ),
        (
            "deck",
            ProviderSettings::NextcloudDeck(NextcloudDeckSettings::default()),
        ),
        (
            "cal",
            ProviderSettings::Calendar(CalendarSettings {
                ical_url: Some("https://calendar.example/feed.ics".to_owned()),
            }),
        ),
    ] {
        store
            .insert(IssueProviderConfig::new(
                IssueProviderId::new(provider).expect("valid provider id"),
                settings,
            ))
            .expect("config insert should succeed");
    }

    let github = Arc::new(InMemoryIssueApi::new());
    let deck = Arc::new(InMemoryIssueApi::new());
    let calendar = Arc::new(InMemoryCalendarApi::default());
    let clock = Arc::new(FixedClock(utc("2024-01-01T06:00:00Z")));

    let mut registry = ProviderRegistry::new();
    for (kind, api) in [
        (IssueProviderKind::GitHub, &github),
        (IssueProviderKind::NextcloudDeck, &deck),
    ] {
        let adapter = ItemAdapter::for_kind(kind).expect("item backend");
        registry.register(IssueProviderService::new(
            Arc::clone(&store),
            Backend::per_item(adapter, Arc::<InMemoryIssueApi>::clone(api)),
        ));
    }
    registry.register(IssueProviderService::new(
        store,
        Backend::calendar(Arc::<InMemoryCalendarApi>::clone(&calendar), clock),
    ));

    Providers {
        registry: Arc::new(registry),
        github,
        deck,
        calendar,
    }
}
