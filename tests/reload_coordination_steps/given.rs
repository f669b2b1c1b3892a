//! Given steps for reload coordination scenarios.

use super::world::{ReloadWorld, parse_day, repeat_cfg};
use issue_sync::issue::domain::{
    IssueId, IssueLink, IssueProviderId, IssueProviderKind, LocalTask, RemoteIssue, TaskId,
};
use rstest_bdd_macros::given;

#[given(r#"repeat config "{id}" was last used on "{last}""#)]
fn repeat_config_last_used(
    world: &mut ReloadWorld,
    id: String,
    last: String,
) -> Result<(), eyre::Report> {
    world.stored_cfgs.push(repeat_cfg(&id, &last)?);
    world.repeat_cfgs.load(world.stored_cfgs.clone());
    Ok(())
}

#[given(r#"today is "{today}""#)]
fn today_is(world: &mut ReloadWorld, today: String) -> Result<(), eyre::Report> {
    world.today = Some(parse_day(&today)?);
    Ok(())
}

#[given(r#"a task linked to GitHub issue "{issue}""#)]
fn task_linked_to_github(world: &mut ReloadWorld, issue: String) -> Result<(), eyre::Report> {
    let issue_id = IssueId::new(issue.as_str())?;
    world.github.upsert(
        RemoteIssue::new(issue_id.clone(), format!("issue {issue}"))
            .with_updated("2024-01-01T00:00:00Z"),
    );
    world.tasks.upsert(
        LocalTask::new(TaskId::new(), "linked").with_issue_link(IssueLink::new(
            IssueProviderKind::GitHub,
            IssueProviderId::new("gh")?,
            issue_id,
        )),
    );
    Ok(())
}
