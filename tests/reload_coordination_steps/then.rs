//! Then steps for reload coordination scenarios.

use super::world::{ReloadWorld, run_async};
use eyre::WrapErr;
use std::time::Duration;
use issue_sync::sync::services::{DueTaskReport, PollOutcome};
use rstest_bdd_macros::then;

fn finished_run(world: &mut ReloadWorld) -> Result<DueTaskReport, eyre::Report> {
    let handle = world
        .pending_run
        .take()
        .ok_or_else(|| eyre::eyre!("no due-task run in scenario world"))?;
    let joined = run_async(tokio::time::timeout(Duration::from_secs(2), handle))
        .wrap_err("due-task run did not finish after the reload")?
        .wrap_err("due-task run panicked")?;
    joined.wrap_err("due-task run failed")
}

#[then("no repeatable task is created")]
fn no_task_created(world: &mut ReloadWorld) -> Result<(), eyre::Report> {
    let report = finished_run(world)?;
    if !report.created.is_empty() || !world.planner.created().is_empty() {
        return Err(eyre::eyre!(
            "expected no repeatable task, found {:?}",
            world.planner.created()
        ));
    }
    Ok(())
}

#[then(r#"a repeatable task is created for "{id}""#)]
fn task_created_for(world: &mut ReloadWorld, id: String) -> Result<(), eyre::Report> {
    let report = finished_run(world)?;
    let created: Vec<&str> = report.created.iter().map(|cfg| cfg.as_str()).collect();
    if created != [id.as_str()] {
        return Err(eyre::eyre!("expected a task for {id}, found {created:?}"));
    }
    Ok(())
}

#[then("due tasks were added {count:usize} time")]
fn due_tasks_added(world: &mut ReloadWorld, count: usize) -> Result<(), eyre::Report> {
    let runs = world.planner.due_today_runs().len();
    if runs != count {
        return Err(eyre::eyre!("expected {count} due-today runs, found {runs}"));
    }
    Ok(())
}

#[then("the poll is skipped")]
fn poll_skipped(world: &mut ReloadWorld) -> Result<(), eyre::Report> {
    match world.poll_outcome {
        Some(PollOutcome::Skipped) => Ok(()),
        other => Err(eyre::eyre!("expected a skipped poll, found {other:?}")),
    }
}

#[then("the GitHub API was not called")]
fn github_not_called(world: &mut ReloadWorld) -> Result<(), eyre::Report> {
    let calls = world.github.total_calls();
    if calls != 0 {
        return Err(eyre::eyre!("expected no GitHub calls, found {calls}"));
    }
    Ok(())
}

#[then("the poll updates {count:usize} task")]
fn poll_updates(world: &mut ReloadWorld, count: usize) -> Result<(), eyre::Report> {
    match world.poll_outcome {
        Some(PollOutcome::Applied { updated }) if updated == count => Ok(()),
        other => Err(eyre::eyre!("expected {count} applied updates, found {other:?}")),
    }
}
