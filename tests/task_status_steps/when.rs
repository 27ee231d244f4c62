//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use clientdesk::task::services::ChangeStatusRequest;
use rstest_bdd_macros::when;

#[when(r#"the task is moved to "{status}""#)]
fn task_moved(world: &mut TaskBoardWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world
        .last_task
        .as_ref()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let filter = world.filter();
    let result = run_async(world.service.move_on_board(
        &mut world.board,
        &filter,
        ChangeStatusRequest::new(task_id, status),
    ));
    match result {
        Ok(task) => {
            world.last_task = Some(task);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}
