//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use clientdesk::task::domain::TaskStatus;
use rstest_bdd_macros::then;

fn parse_status(status: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(status)
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskBoardWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task_id = world
        .last_task
        .as_ref()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let tasks = run_async(world.service.list_tasks(&world.filter()))?;
    let stored = tasks
        .iter()
        .find(|task| task.id() == task_id)
        .ok_or_else(|| eyre::eyre!("task {task_id} was not persisted"))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#"the "{status}" column lists "{description}""#)]
fn column_lists(
    world: &TaskBoardWorld,
    status: String,
    description: String,
) -> Result<(), eyre::Report> {
    let column = world.board.column(parse_status(&status)?);
    eyre::ensure!(
        column.iter().any(|task| task.description() == description),
        "{description:?} is not in the {status} column"
    );
    Ok(())
}

#[then(r#"the move fails with a "{kind}" error"#)]
fn move_fails(world: &TaskBoardWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the move to fail"))?;
    eyre::ensure!(
        err.kind().as_str() == kind,
        "expected a {kind} error, got {} ({err})",
        err.kind()
    );
    Ok(())
}
