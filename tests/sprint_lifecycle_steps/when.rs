//! When steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, day, run_async};
use rstest_bdd_macros::when;
use sprintwise::sprint::{domain::RetrospectiveNotes, services::CreateSprintRequest};

#[when("the sprint is started")]
fn start_sprint(world: &mut SprintWorld) -> Result<(), eyre::Report> {
    let sprint_id = world.current_sprint()?.id();
    let result = run_async(world.service.start_sprint(world.manager, sprint_id));
    world.record(result);
    Ok(())
}

#[when("the sprint is cancelled")]
fn cancel_sprint(world: &mut SprintWorld) -> Result<(), eyre::Report> {
    let sprint_id = world.current_sprint()?.id();
    let result = run_async(world.service.cancel_sprint(world.manager, sprint_id));
    world.record(result);
    Ok(())
}

#[when("the sprint is completed")]
fn complete_sprint(world: &mut SprintWorld) -> Result<(), eyre::Report> {
    let sprint_id = world.current_sprint()?.id();
    let notes = RetrospectiveNotes::new().with_what_went_well(vec!["Focus".to_owned()]);
    let result = run_async(
        world
            .service
            .complete_sprint(world.manager, sprint_id, notes),
    );
    world.record(result);
    Ok(())
}

#[when("the first attached task is completed")]
fn complete_first_task(world: &mut SprintWorld) -> Result<(), eyre::Report> {
    let sprint_id = world.current_sprint()?.id();
    let task = *world
        .attached
        .first()
        .ok_or_else(|| eyre::eyre!("no task attached in scenario world"))?;
    let result = run_async(world.service.complete_task(world.manager, sprint_id, task));
    world.record(result);
    Ok(())
}

#[when(r#"another sprint "{name}" is planned from day {offset:u64} for {days:u64} days"#)]
fn plan_another_sprint(world: &mut SprintWorld, name: String, offset: u64, days: u64) {
    let request = CreateSprintRequest::new(
        world.project,
        name,
        day(offset),
        day(offset.saturating_add(days)),
    );
    let result = run_async(world.service.create_sprint(world.manager, request));
    world.last_result = Some(result);
}
