//! End-to-end refresh across per-item, bulk and calendar providers.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{Providers, all_day_event, day, linked_task, providers};
use issue_sync::issue::domain::{IssueId, IssueProviderKind, LocalTask, RemoteIssue, TaskId};
use issue_sync::sync::{
    adapters::memory::InMemoryIssueTaskStore,
    services::{IssuePoller, PollOutcome, ReloadCoordinator},
};
use rstest::rstest;

struct Linked {
    github: LocalTask,
    deck: LocalTask,
    event: LocalTask,
}

fn seed(providers: &Providers) -> Linked {
    providers.github.upsert(
        RemoteIssue::new(IssueId::new("12").expect("valid issue id"), "Crash on save")
            .with_number(12)
            .with_updated("2024-01-01T00:00:00Z"),
    );
    providers.deck.upsert(
        RemoteIssue::new(IssueId::new("5").expect("valid issue id"), "Ship it")
            .with_updated("500")
            .with_state("done"),
    );
    providers
        .calendar
        .set_events(vec![all_day_event("cal", "evt", "2024-01-03T00:00:00Z")]);

    Linked {
        github: linked_task(IssueProviderKind::GitHub, "gh", "12"),
        deck: linked_task(IssueProviderKind::NextcloudDeck, "deck", "5"),
        event: linked_task(IssueProviderKind::Calendar, "cal", "evt")
            .with_due_day(day("2024-01-01"))
            .with_time_estimate(Duration::from_secs(30 * 60)),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn poll_refreshes_every_provider_family(providers: Providers) {
    let linked = seed(&providers);
    let tasks = Arc::new(InMemoryIssueTaskStore::with_tasks([
        linked.github.clone(),
        linked.deck.clone(),
        linked.event.clone(),
        LocalTask::new(TaskId::new(), "unlinked"),
    ]));
    let poller = IssuePoller::new(
        Arc::clone(&providers.registry),
        Arc::clone(&tasks),
        ReloadCoordinator::new(),
    );

    let outcome = poller.poll_once().await.expect("poll should succeed");

    assert_eq!(outcome, PollOutcome::Applied { updated: 3 });
    assert_eq!(providers.github.calls("get_by_id"), 1);
    assert_eq!(providers.deck.calls("list_open"), 1);
    assert_eq!(providers.deck.total_calls(), 1);
    assert_eq!(providers.calendar.requests(), 1);

    let github = tasks.get(linked.github.id()).expect("github task");
    assert!(github.issue_was_updated());
    assert!(github.issue_last_updated().is_some());
    let deck = tasks.get(linked.deck.id()).expect("deck task");
    assert!(deck.is_done());
    let event = tasks.get(linked.event.id()).expect("calendar task");
    assert_eq!(event.due_day(), Some(day("2024-01-03")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unchanged_remotes_produce_no_updates(providers: Providers) {
    let linked = seed(&providers);
    let tasks = Arc::new(InMemoryIssueTaskStore::with_tasks([
        linked.github,
        linked.deck,
        linked.event,
    ]));
    let poller = IssuePoller::new(
        Arc::clone(&providers.registry),
        Arc::clone(&tasks),
        ReloadCoordinator::new(),
    );
    poller.poll_once().await.expect("first poll should succeed");

    let outcome = poller.poll_once().await.expect("second poll should succeed");

    assert_eq!(outcome, PollOutcome::Applied { updated: 0 });
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registry_polls_at_the_shortest_interval(providers: Providers) {
    let poller = IssuePoller::new(
        Arc::clone(&providers.registry),
        Arc::new(InMemoryIssueTaskStore::default()),
        ReloadCoordinator::new(),
    );

    assert_eq!(poller.interval(), Duration::from_secs(5 * 60));
}
