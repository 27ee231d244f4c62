//! In-memory integration tests for the time tracking session.

use super::helpers::{TrackingFixture, monday_morning, tracking};
use chrono::Duration;
use clientdesk::{
    error::ErrorKind,
    ids::{ClientId, ProjectId},
    notification::NotificationKind,
    time_tracking::{
        domain::{EntryLinks, ReportWindow},
        ports::TimeEntryFilter,
        services::{DurationInput, ManualEntryRequest, StartTimerRequest, TimeTrackingSession},
    },
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn working_day_is_reported_per_project(tracking: TrackingFixture) -> Result<(), eyre::Report> {
    let TrackingFixture {
        mut session,
        clock,
        notifications,
        ..
    } = tracking;
    let client_id = ClientId::new();
    let website = ProjectId::new();
    let support = ProjectId::new();

    session
        .start_timer(
            StartTimerRequest::new("Homepage layout")
                .with_links(EntryLinks::none().with_client(client_id).with_project(website)),
        )
        .await?;
    clock.advance(Duration::minutes(50));
    session.stop_timer().await?;

    session
        .add_time_entry(
            ManualEntryRequest::new(
                "Ticket triage",
                monday_morning() + Duration::hours(2),
                DurationInput::HoursAndMinutes {
                    hours: "1".to_owned(),
                    minutes: "15".to_owned(),
                },
            )
            .with_links(EntryLinks::none().with_client(client_id).with_project(support)),
        )
        .await?;

    let report = session
        .report(
            TimeEntryFilter::all().for_client(client_id),
            Some(ReportWindow {
                from: monday_morning(),
                to: monday_morning() + Duration::days(1),
            }),
        )
        .await?;

    eyre::ensure!(report.entry_count == 2, "expected two entries");
    eyre::ensure!(report.total_minutes == 125, "total was {}", report.total_minutes);
    eyre::ensure!(report.by_project.get(&website) == Some(&50), "website total mismatch");
    eyre::ensure!(report.by_project.get(&support) == Some(&75), "support total mismatch");
    eyre::ensure!(
        notifications.count(NotificationKind::Success) == 3,
        "expected a success notification per operation"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timer_survives_session_reload(tracking: TrackingFixture) -> Result<(), eyre::Report> {
    let TrackingFixture {
        mut session,
        repository,
        clock,
        notifications,
    } = tracking;
    let user_id = session.user_id();
    let started = session
        .start_timer(StartTimerRequest::new("Quarterly review"))
        .await?;
    session.shutdown().await;

    clock.advance(Duration::minutes(20));
    let mut reloaded = TimeTrackingSession::new(
        user_id,
        repository,
        clock,
        Arc::new(notifications),
    );
    let resumed = reloaded.resume().await?;
    eyre::ensure!(
        resumed.as_ref().map(|entry| entry.id()) == Some(started.id()),
        "wrong entry resumed"
    );
    eyre::ensure!(reloaded.refresh_elapsed() == 1_200, "elapsed mismatch");

    let stopped = reloaded.stop_timer().await?;
    eyre::ensure!(stopped.duration_minutes() == 20, "duration mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn running_timer_blocks_start_and_delete(tracking: TrackingFixture) -> Result<(), eyre::Report> {
    let TrackingFixture { mut session, .. } = tracking;
    let running = session
        .start_timer(StartTimerRequest::new("Client call"))
        .await?;

    let start_err = session
        .start_timer(StartTimerRequest::new("Another call"))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("second start should fail"))?;
    eyre::ensure!(start_err.kind() == ErrorKind::Conflict, "expected a conflict");

    let delete_err = session
        .delete_time_entry(running.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("deleting a running entry should fail"))?;
    eyre::ensure!(delete_err.kind() == ErrorKind::State, "expected a state error");

    let stopped = session.stop_timer().await?;
    session.delete_time_entry(stopped.id()).await?;
    let remaining = session.list_entries(TimeEntryFilter::all()).await?;
    eyre::ensure!(remaining.is_empty(), "entry should be gone");
    Ok(())
}
