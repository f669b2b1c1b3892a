//! Regression tests for due-task creation racing a data reload.
//!
//! The reload replaces `repeat1` (last created 2025-06-22) with a copy
//! last created 2025-06-23. A consumer that read the pre-reload value
//! would create a duplicate task for 2025-06-23.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{FixedClock, daily, day};
use issue_sync::sync::{
    adapters::memory::{InMemoryDueTaskPlanner, InMemoryTaskRepeatCfgRepository},
    domain::RepeatCfgId,
    services::{DueTaskConsumer, ReloadCoordinator},
};
use rstest::{fixture, rstest};
use tokio::sync::watch;
use tokio::time::{sleep, timeout};

type Consumer =
    DueTaskConsumer<InMemoryTaskRepeatCfgRepository, InMemoryDueTaskPlanner, FixedClock>;

struct Race {
    consumer: Arc<Consumer>,
    repeat_cfgs: Arc<InMemoryTaskRepeatCfgRepository>,
    planner: Arc<InMemoryDueTaskPlanner>,
    reloads: ReloadCoordinator,
}

#[fixture]
fn race() -> Race {
    let repeat_cfgs = Arc::new(InMemoryTaskRepeatCfgRepository::with_cfgs([
        daily("repeat1", "2025-06-22"),
        daily("repeat2", "2025-06-23"),
    ]));
    let planner = Arc::new(InMemoryDueTaskPlanner::new());
    let reloads = ReloadCoordinator::new();
    let consumer = Arc::new(DueTaskConsumer::new(
        Arc::clone(&repeat_cfgs),
        Arc::clone(&planner),
        Arc::new(FixedClock::on(day("2025-06-23"))),
        reloads.clone(),
    ));
    Race {
        consumer,
        repeat_cfgs,
        planner,
        reloads,
    }
}

async fn wait_for_runs(planner: &InMemoryDueTaskPlanner, runs: usize) {
    timeout(Duration::from_secs(2), async {
        while planner.due_today_runs().len() < runs {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("consumer should run after the reload completes");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn consumer_sees_only_post_reload_values(race: Race) {
    let (stop, shutdown) = watch::channel(false);
    let consumer = Arc::clone(&race.consumer);
    let handle = tokio::spawn(async move { consumer.run(shutdown).await });
    sleep(Duration::from_millis(20)).await;

    let ticket = race.reloads.begin_reload();
    sleep(Duration::from_millis(20)).await;
    race.repeat_cfgs.load([
        daily("repeat1", "2025-06-23"),
        daily("repeat2", "2025-06-23"),
    ]);
    ticket.complete();
    wait_for_runs(&race.planner, 1).await;

    stop.send(true).expect("consumer should still listen");
    handle
        .await
        .expect("consumer task should join")
        .expect("consumer should stop cleanly");
    assert!(race.planner.created().is_empty());
    assert_eq!(race.planner.due_today_runs(), vec![day("2025-06-23")]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_configuration_is_created_once_across_reloads(race: Race) {
    let (stop, shutdown) = watch::channel(false);
    let consumer = Arc::clone(&race.consumer);
    let handle = tokio::spawn(async move { consumer.run(shutdown).await });
    sleep(Duration::from_millis(20)).await;

    race.reloads.begin_reload().complete();
    wait_for_runs(&race.planner, 1).await;
    race.reloads.begin_reload().complete();
    wait_for_runs(&race.planner, 2).await;

    stop.send(true).expect("consumer should still listen");
    handle
        .await
        .expect("consumer task should join")
        .expect("consumer should stop cleanly");
    let repeat1 = RepeatCfgId::new("repeat1").expect("valid repeat cfg id");
    assert_eq!(race.planner.created(), vec![(repeat1.clone(), day("2025-06-23"))]);
    assert_eq!(
        race.repeat_cfgs
            .get(&repeat1)
            .and_then(|cfg| cfg.last_task_creation()),
        Some(day("2025-06-23"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn aborted_reload_does_not_trigger_the_consumer(race: Race) {
    let (stop, shutdown) = watch::channel(false);
    let consumer = Arc::clone(&race.consumer);
    let handle = tokio::spawn(async move { consumer.run(shutdown).await });
    sleep(Duration::from_millis(20)).await;

    drop(race.reloads.begin_reload());
    sleep(Duration::from_millis(50)).await;

    stop.send(true).expect("consumer should still listen");
    handle
        .await
        .expect("consumer task should join")
        .expect("consumer should stop cleanly");
    assert!(race.planner.due_today_runs().is_empty());
    assert_eq!(race.reloads.state().generation(), 0);
}
