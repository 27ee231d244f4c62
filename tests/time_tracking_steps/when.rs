//! When steps for time tracking BDD scenarios.

use super::world::{TimeTrackingWorld, run_async};
use chrono::TimeDelta;
use clientdesk::time_tracking::services::{DurationInput, ManualEntryRequest, StartTimerRequest};
use mockable::Clock;
use rstest_bdd_macros::when;

#[when("the clock advances by {seconds:i64} seconds")]
fn clock_advances(world: &mut TimeTrackingWorld, seconds: i64) -> Result<(), eyre::Report> {
    let delta = TimeDelta::try_seconds(seconds)
        .ok_or_else(|| eyre::eyre!("seconds out of range: {seconds}"))?;
    world.clock.advance(delta);
    Ok(())
}

#[when("the timer is stopped")]
fn timer_stopped(world: &mut TimeTrackingWorld) {
    let result = run_async(world.session.stop_timer());
    world.record(result, |world, entry| world.last_entry = Some(entry));
}

#[when(r#"a timer is started for "{description}""#)]
fn timer_started(world: &mut TimeTrackingWorld, description: String) {
    let result = run_async(
        world
            .session
            .start_timer(StartTimerRequest::new(description)),
    );
    world.record(result, |world, entry| world.last_entry = Some(entry));
}

#[when(r#"{minutes:u32} minutes are logged manually for "{description}""#)]
fn minutes_logged(world: &mut TimeTrackingWorld, minutes: u32, description: String) {
    let start_time = world.clock.utc() - TimeDelta::hours(3);
    let request = ManualEntryRequest::new(description, start_time, DurationInput::Minutes(minutes));
    let result = run_async(world.session.add_time_entry(request));
    world.record(result, |world, entry| world.last_entry = Some(entry));
}

#[when("the running entry is deleted")]
fn running_entry_deleted(world: &mut TimeTrackingWorld) -> Result<(), eyre::Report> {
    let entry_id = world
        .started_entry
        .as_ref()
        .map(|entry| entry.id())
        .ok_or_else(|| eyre::eyre!("missing started entry in scenario world"))?;
    let result = run_async(world.session.delete_time_entry(entry_id));
    world.record(result, |_, ()| {});
    Ok(())
}
