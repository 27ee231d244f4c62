//! In-memory integration tests for task status changes on the board.

use super::helpers::{BoardFixture, board};
use chrono::Duration;
use clientdesk::{
    error::ErrorKind,
    task::{
        domain::{Task, TaskStatus},
        ports::TaskFilter,
        services::{ChangeStatusRequest, CreateTaskRequest},
    },
};
use rstest::rstest;

fn first(tasks: &[Task]) -> Result<&Task, eyre::Report> {
    tasks.first().ok_or_else(|| eyre::eyre!("expected at least one seeded task"))
}

async fn seed(fixture: &BoardFixture, items: &[(&str, &str)]) -> Result<Vec<Task>, eyre::Report> {
    let mut tasks = Vec::with_capacity(items.len());
    for (description, status) in items {
        let task = fixture
            .service
            .create_task(
                CreateTaskRequest::new(*description, fixture.project_id, fixture.assignee_id)
                    .with_status(*status),
            )
            .await?;
        tasks.push(task);
    }
    Ok(tasks)
}

fn descriptions(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::description).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_partitions_tasks_in_creation_order(board: BoardFixture) -> Result<(), eyre::Report> {
    seed(
        &board,
        &[
            ("Wireframes", "doing"),
            ("Copy deck", "done"),
            ("Logo", "doing"),
            ("Invoice", "deferred"),
            ("Sitemap", "for_review"),
        ],
    )
    .await?;

    let loaded = board
        .service
        .load_board(&TaskFilter::all().for_project(board.project_id))
        .await?;

    eyre::ensure!(
        descriptions(loaded.column(TaskStatus::Doing)) == ["Wireframes", "Logo"],
        "doing column mismatch"
    );
    eyre::ensure!(
        descriptions(loaded.column(TaskStatus::ForReview)) == ["Sitemap"],
        "review column mismatch"
    );
    eyre::ensure!(
        descriptions(loaded.column(TaskStatus::Done)) == ["Copy deck"],
        "done column mismatch"
    );
    eyre::ensure!(
        descriptions(loaded.column(TaskStatus::Deferred)) == ["Invoice"],
        "deferred column mismatch"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_and_drop_persists_and_refreshes(board: BoardFixture) -> Result<(), eyre::Report> {
    let tasks = seed(
        &board,
        &[("Wireframes", "doing"), ("Logo", "doing"), ("Sitemap", "for_review")],
    )
    .await?;
    let filter = TaskFilter::all().for_project(board.project_id);
    let mut view = board.service.load_board(&filter).await?;
    board.clock.advance(Duration::minutes(5));

    let moved = board
        .service
        .move_on_board(
            &mut view,
            &filter,
            ChangeStatusRequest::new(first(&tasks)?.id(), "for_review"),
        )
        .await?;

    eyre::ensure!(moved.status() == TaskStatus::ForReview, "status not persisted");
    eyre::ensure!(moved.updated_at() > moved.created_at(), "updated_at not bumped");
    eyre::ensure!(
        descriptions(view.column(TaskStatus::ForReview)) == ["Wireframes", "Sitemap"],
        "refreshed board should follow creation order"
    );
    eyre::ensure!(
        descriptions(view.column(TaskStatus::Doing)) == ["Logo"],
        "doing column mismatch"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_leaves_board_untouched(board: BoardFixture) -> Result<(), eyre::Report> {
    let tasks = seed(&board, &[("Wireframes", "doing")]).await?;
    let filter = TaskFilter::all();
    let mut view = board.service.load_board(&filter).await?;

    let err = board
        .service
        .move_on_board(
            &mut view,
            &filter,
            ChangeStatusRequest::new(first(&tasks)?.id(), "archived"),
        )
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("unknown status should be rejected"))?;

    eyre::ensure!(err.kind() == ErrorKind::Validation, "expected a validation error");
    eyre::ensure!(
        descriptions(view.column(TaskStatus::Doing)) == ["Wireframes"],
        "task should stay in doing"
    );
    eyre::ensure!(
        board.notifications.last().map(|note| note.message)
            == Some("invalid task status: archived".to_owned()),
        "expected an error notification"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn any_status_may_follow_any_other(board: BoardFixture) -> Result<(), eyre::Report> {
    let tasks = seed(&board, &[("Wireframes", "done")]).await?;
    let id = first(&tasks)?.id();

    for status in ["deferred", "doing", "done", "for_review", "doing"] {
        let updated = board
            .service
            .change_status(ChangeStatusRequest::new(id, status))
            .await?;
        eyre::ensure!(updated.status().as_str() == status, "status {status} not applied");
    }
    Ok(())
}
