//! Given steps for time tracking BDD scenarios.

use super::world::{TimeTrackingWorld, run_async};
use clientdesk::time_tracking::services::StartTimerRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a timer is running for "{description}""#)]
fn timer_running(world: &mut TimeTrackingWorld, description: String) -> Result<(), eyre::Report> {
    let started = run_async(
        world
            .session
            .start_timer(StartTimerRequest::new(description)),
    )
    .wrap_err("start timer in scenario setup")?;
    world.started_entry = Some(started);
    Ok(())
}

#[given("no timer is running")]
fn no_timer_running(world: &mut TimeTrackingWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.session.active_entry().is_none(),
        "fresh session should be idle"
    );
    Ok(())
}
