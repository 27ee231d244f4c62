//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use clientdesk::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a task "{description}" with status "{status}""#)]
fn task_with_status(
    world: &mut TaskBoardWorld,
    description: String,
    status: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(description, world.project_id, world.assignee_id)
        .with_status(status);
    let created = run_async(world.service.create_task(request))
        .wrap_err("create task in scenario setup")?;
    world.board = run_async(world.service.load_board(&world.filter()))
        .wrap_err("load board in scenario setup")?;
    world.last_task = Some(created);
    Ok(())
}
