//! Issue poller tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crate::issue::{
    adapters::{
        memory::{InMemoryConfigStore, InMemoryIssueApi},
        providers::{Backend, ItemAdapter},
    },
    domain::{
        ClickUpSettings, GitHubSettings, IssueId, IssueLink, IssueProviderConfig,
        IssueProviderId, IssueProviderKind, LocalTask, ProviderSettings, RefreshResult,
        RemoteIssue, TaskId,
    },
    services::{IssueProviderService, ProviderRegistry},
};
use crate::sync::{
    adapters::memory::InMemoryIssueTaskStore,
    ports::{IssueTaskStore, SyncPortResult},
    services::{FALLBACK_POLL_INTERVAL, IssuePoller, PollOutcome, ReloadCoordinator},
};
use rstest::{fixture, rstest};

fn github_registry() -> (Arc<ProviderRegistry<InMemoryConfigStore>>, Arc<InMemoryIssueApi>) {
    let store = Arc::new(InMemoryConfigStore::new());
    store
        .insert(IssueProviderConfig::new(
            IssueProviderId::new("gh").expect("valid provider id"),
            ProviderSettings::GitHub(GitHubSettings {
                repo: Some("acme/widgets".to_owned()),
                ..GitHubSettings::default()
            }),
        ))
        .expect("config insert should succeed");
    let api = Arc::new(InMemoryIssueApi::with_issues([RemoteIssue::new(
        IssueId::new("7").expect("valid issue id"),
        "Crash on save",
    )
    .with_updated("2024-01-01T00:00:00Z")]));
    let adapter = ItemAdapter::for_kind(IssueProviderKind::GitHub).expect("item backend");
    let mut registry = ProviderRegistry::new();
    registry.register(IssueProviderService::new(
        store,
        Backend::per_item(adapter, Arc::<InMemoryIssueApi>::clone(&api)),
    ));
    (Arc::new(registry), api)
}

fn linked_task() -> LocalTask {
    LocalTask::new(TaskId::new(), "old title").with_issue_link(IssueLink::new(
        IssueProviderKind::GitHub,
        IssueProviderId::new("gh").expect("valid provider id"),
        IssueId::new("7").expect("valid issue id"),
    ))
}

/// Task store that runs a whole reload while the poller reads tasks.
struct ReloadingStore {
    inner: InMemoryIssueTaskStore,
    reloads: ReloadCoordinator,
}

#[async_trait]
impl IssueTaskStore for ReloadingStore {
    async fn linked_tasks(&self) -> SyncPortResult<Vec<LocalTask>> {
        let tasks = self.inner.linked_tasks().await;
        self.reloads.begin_reload().complete();
        tasks
    }

    async fn apply_refresh(&self, results: &[RefreshResult]) -> SyncPortResult<usize> {
        self.inner.apply_refresh(results).await
    }
}

struct Env {
    poller: IssuePoller<InMemoryConfigStore, InMemoryIssueTaskStore>,
    tasks: Arc<InMemoryIssueTaskStore>,
    api: Arc<InMemoryIssueApi>,
    reloads: ReloadCoordinator,
    task: LocalTask,
}

#[fixture]
fn env() -> Env {
    let (registry, api) = github_registry();
    let task = linked_task();
    let tasks = Arc::new(InMemoryIssueTaskStore::with_tasks([task.clone()]));
    let reloads = ReloadCoordinator::new();
    let poller = IssuePoller::new(registry, Arc::clone(&tasks), reloads.clone());
    Env {
        poller,
        tasks,
        api,
        reloads,
        task,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn poll_applies_fresh_results(env: Env) {
    let outcome = env.poller.poll_once().await.expect("poll should succeed");

    assert_eq!(outcome, PollOutcome::Applied { updated: 1 });
    let stored = env.tasks.get(env.task.id()).expect("task should exist");
    assert_ne!(stored.title(), "old title");
    assert!(stored.issue_last_updated().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_poll_finds_nothing_stale(env: Env) {
    env.poller.poll_once().await.expect("first poll should succeed");

    let outcome = env.poller.poll_once().await.expect("second poll should succeed");

    assert_eq!(outcome, PollOutcome::Applied { updated: 0 });
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn poll_is_skipped_while_reload_runs(env: Env) {
    let ticket = env.reloads.begin_reload();

    let outcome = env.poller.poll_once().await.expect("poll should succeed");

    assert_eq!(outcome, PollOutcome::Skipped);
    assert_eq!(env.api.total_calls(), 0);
    ticket.complete();
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn results_are_discarded_when_reload_interleaves() {
    let (registry, api) = github_registry();
    let task = linked_task();
    let reloads = ReloadCoordinator::new();
    let store = Arc::new(ReloadingStore {
        inner: InMemoryIssueTaskStore::with_tasks([task.clone()]),
        reloads: reloads.clone(),
    });
    let poller = IssuePoller::new(registry, Arc::clone(&store), reloads.clone());

    let outcome = poller.poll_once().await.expect("poll should succeed");

    assert_eq!(outcome, PollOutcome::Discarded { stale: 1 });
    assert_eq!(api.calls("get_by_id"), 1);
    let stored = store.inner.get(task.id()).expect("task should exist");
    assert_eq!(stored.title(), "old title");
    assert_eq!(reloads.state().generation(), 1);
}

#[rstest]
fn interval_follows_shortest_provider(env: Env) {
    assert_eq!(env.poller.interval(), Duration::from_secs(5 * 60));

    let store = Arc::new(InMemoryConfigStore::new());
    store
        .insert(IssueProviderConfig::new(
            IssueProviderId::new("cu").expect("valid provider id"),
            ProviderSettings::ClickUp(ClickUpSettings::default()),
        ))
        .expect("config insert should succeed");
    let adapter = ItemAdapter::for_kind(IssueProviderKind::ClickUp).expect("item backend");
    let mut registry = ProviderRegistry::new();
    registry.register(IssueProviderService::new(
        store,
        Backend::per_item(adapter, Arc::new(InMemoryIssueApi::new())),
    ));
    let poller = IssuePoller::new(
        Arc::new(registry),
        Arc::new(InMemoryIssueTaskStore::default()),
        ReloadCoordinator::new(),
    );
    assert_eq!(poller.interval(), Duration::from_secs(60));
}

#[test]
fn empty_registry_uses_fallback_interval() {
    let poller = IssuePoller::new(
        Arc::new(ProviderRegistry::<InMemoryConfigStore>::new()),
        Arc::new(InMemoryIssueTaskStore::default()),
        ReloadCoordinator::new(),
    );

    assert_eq!(poller.interval(), FALLBACK_POLL_INTERVAL);
}
