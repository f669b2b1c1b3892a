//! Registry routing tests.

use std::sync::Arc;
use std::time::Duration;

use super::support::{github_config, issue_id, linked_task, provider_id};
use crate::issue::{
    adapters::{
        memory::{InMemoryConfigStore, InMemoryIssueApi},
        providers::{Backend, ItemAdapter},
    },
    domain::{
        ClickUpSettings, IssueProviderConfig, IssueProviderKind, LocalTask, ProviderSettings,
        RemoteIssue, TaskId,
    },
    services::{IssueProviderError, IssueProviderService, ProviderRegistry},
};
use rstest::{fixture, rstest};

struct Routed {
    registry: ProviderRegistry<InMemoryConfigStore>,
    github: Arc<InMemoryIssueApi>,
    clickup: Arc<InMemoryIssueApi>,
}

#[fixture]
fn routed() -> Routed {
    let store = Arc::new(InMemoryConfigStore::new());
    store
        .insert(github_config("gh"))
        .expect("config insert should succeed");
    store
        .insert(IssueProviderConfig::new(
            provider_id("cu"),
            ProviderSettings::ClickUp(ClickUpSettings {
                api_key: Some("k".to_owned()),
            }),
        ))
        .expect("config insert should succeed");

    let github = Arc::new(InMemoryIssueApi::with_issues([RemoteIssue::new(
        issue_id("1"),
        "GitHub issue",
    )
    .with_updated("2024-01-01T00:00:00Z")]));
    let clickup = Arc::new(InMemoryIssueApi::with_issues([RemoteIssue::new(
        issue_id("abc"),
        "ClickUp task",
    )
    .with_updated("1704067200000")]));

    let mut registry = ProviderRegistry::new();
    for (kind, api) in [
        (IssueProviderKind::GitHub, &github),
        (IssueProviderKind::ClickUp, &clickup),
    ] {
        let adapter = ItemAdapter::for_kind(kind).expect("item backend");
        let backend = Backend::per_item(adapter, Arc::<InMemoryIssueApi>::clone(api));
        registry.register(IssueProviderService::new(Arc::clone(&store), backend));
    }
    Routed {
        registry,
        github,
        clickup,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_routes_tasks_to_their_backend(routed: Routed) {
    let tasks = vec![
        linked_task(IssueProviderKind::ClickUp, "cu", "abc"),
        LocalTask::new(TaskId::new(), "plain"),
        linked_task(IssueProviderKind::GitHub, "gh", "1"),
    ];

    let results = routed
        .registry
        .refresh_tasks(&tasks)
        .await
        .expect("refresh should succeed");

    let titles: Vec<&str> = results
        .iter()
        .map(|result| result.issue_title.as_str())
        .collect();
    assert_eq!(titles, vec!["ClickUp task", "#1 GitHub issue"]);
    assert_eq!(routed.github.calls("get_by_id"), 1);
    assert_eq!(routed.clickup.calls("get_by_id"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_of_unregistered_kind_fails(routed: Routed) {
    let tasks = vec![linked_task(IssueProviderKind::Jira, "jira", "PROJ-1")];

    let result = routed.registry.refresh_tasks(&tasks).await;

    assert!(matches!(
        result,
        Err(IssueProviderError::ProviderNotRegistered(IssueProviderKind::Jira))
    ));
}

#[rstest]
fn registry_reports_kinds_and_shortest_interval(routed: Routed) {
    let kinds: Vec<IssueProviderKind> = routed.registry.kinds().collect();

    assert_eq!(
        kinds,
        vec![IssueProviderKind::GitHub, IssueProviderKind::ClickUp]
    );
    assert_eq!(
        routed.registry.min_poll_interval(),
        Some(Duration::from_secs(60))
    );
    assert!(routed.registry.service(IssueProviderKind::GitHub).is_ok());
}

#[rstest]
fn empty_registry_has_no_interval() {
    let registry: ProviderRegistry<InMemoryConfigStore> = ProviderRegistry::new();

    assert_eq!(registry.min_poll_interval(), None);
}
