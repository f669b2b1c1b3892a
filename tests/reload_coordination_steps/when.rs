//! When steps for reload coordination scenarios.

use super::world::{ReloadWorld, repeat_cfg, run_async};
use issue_sync::sync::services::IssuePoller;
use rstest_bdd_macros::when;
use std::sync::Arc;
use std::time::Duration;

#[when("a reload starts")]
fn reload_starts(world: &mut ReloadWorld) {
    world.ticket = Some(world.reloads.begin_reload());
}

#[when("the due-task consumer runs")]
fn consumer_runs(world: &mut ReloadWorld) -> Result<(), eyre::Report> {
    let consumer = world.consumer()?;
    world.pending_run = Some(tokio::spawn(async move { consumer.run_once().await }));
    run_async(tokio::time::sleep(Duration::from_millis(20)));
    Ok(())
}

#[when(r#"the reload stores repeat config "{id}" as last used on "{last}""#)]
fn reload_stores_cfg(
    world: &mut ReloadWorld,
    id: String,
    last: String,
) -> Result<(), eyre::Report> {
    let replacement = repeat_cfg(&id, &last)?;
    world.stored_cfgs.retain(|cfg| cfg.id() != replacement.id());
    world.stored_cfgs.push(replacement);
    world.repeat_cfgs.load(world.stored_cfgs.clone());
    Ok(())
}

#[when("the reload completes")]
fn reload_completes(world: &mut ReloadWorld) -> Result<(), eyre::Report> {
    let ticket = world
        .ticket
        .take()
        .ok_or_else(|| eyre::eyre!("no reload running in scenario world"))?;
    ticket.complete();
    Ok(())
}

#[when("the issue poller runs")]
fn poller_runs(world: &mut ReloadWorld) -> Result<(), eyre::Report> {
    let poller = IssuePoller::new(
        Arc::clone(&world.registry),
        Arc::clone(&world.tasks),
        world.reloads.clone(),
    );
    world.poll_outcome = Some(run_async(poller.poll_once())?);
    Ok(())
}
