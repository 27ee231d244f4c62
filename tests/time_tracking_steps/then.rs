//! Then steps for time tracking BDD scenarios.

use super::world::TimeTrackingWorld;
use clientdesk::time_tracking::domain::TimeEntry;
use rstest_bdd_macros::then;

fn last_entry(world: &TimeTrackingWorld) -> Result<&TimeEntry, eyre::Report> {
    world
        .last_entry
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing last entry; error was {:?}", world.last_error))
}

#[then("the stopped entry logged {minutes:u32} minutes")]
fn stopped_entry_logged(world: &TimeTrackingWorld, minutes: u32) -> Result<(), eyre::Report> {
    let entry = last_entry(world)?;
    eyre::ensure!(!entry.is_running(), "entry is still running");
    eyre::ensure!(
        entry.duration_minutes() == minutes,
        "expected {minutes} minutes, found {}",
        entry.duration_minutes()
    );
    Ok(())
}

#[then("the last entry logged {minutes:u32} minutes")]
fn last_entry_logged(world: &TimeTrackingWorld, minutes: u32) -> Result<(), eyre::Report> {
    let entry = last_entry(world)?;
    eyre::ensure!(
        entry.duration_minutes() == minutes,
        "expected {minutes} minutes, found {}",
        entry.duration_minutes()
    );
    Ok(())
}

#[then("the stopped entry spans {millis:i64} milliseconds")]
fn stopped_entry_spans(world: &TimeTrackingWorld, millis: i64) -> Result<(), eyre::Report> {
    let entry = last_entry(world)?;
    let end_time = entry
        .end_time()
        .ok_or_else(|| eyre::eyre!("stopped entry has no end time"))?;
    let span = (end_time - entry.start_time()).num_milliseconds();
    eyre::ensure!(span == millis, "expected {millis} ms, found {span} ms");
    Ok(())
}

#[then("no timer is active")]
fn no_timer_active(world: &TimeTrackingWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.session.active_entry().is_none(),
        "a timer is still active"
    );
    eyre::ensure!(
        world.session.elapsed_seconds() == 0,
        "elapsed counter was not reset"
    );
    Ok(())
}

#[then(r#"the active timer is "{description}""#)]
fn active_timer_is(world: &TimeTrackingWorld, description: String) -> Result<(), eyre::Report> {
    let active = world
        .session
        .active_entry()
        .ok_or_else(|| eyre::eyre!("no timer is active"))?;
    eyre::ensure!(
        active.description() == description,
        "expected active timer {description:?}, found {:?}",
        active.description()
    );
    Ok(())
}

#[then(r#"the operation fails with a "{kind}" error"#)]
fn operation_fails(world: &TimeTrackingWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))?;
    eyre::ensure!(
        err.kind().as_str() == kind,
        "expected a {kind} error, got {} ({err})",
        err.kind()
    );
    Ok(())
}
