//! Then steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, run_async};
use rstest_bdd_macros::then;
use sprintwise::sprint::{
    domain::{SprintDomainError, SprintStatus, TaskId},
    services::{AttachTaskRequest, SprintPlanningError},
};

#[then(r#"the sprint status is "{status}""#)]
fn sprint_status_is(world: &SprintWorld, status: String) -> Result<(), eyre::Report> {
    let expected = SprintStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.current_sprint()?.status();
    eyre::ensure!(
        actual == expected,
        "expected status {expected}, found {actual}"
    );
    Ok(())
}

#[then("the sprint has {total:u32} committed and {completed:u32} completed story points")]
fn sprint_points(world: &SprintWorld, total: u32, completed: u32) -> Result<(), eyre::Report> {
    let capacity = world.current_sprint()?.capacity();
    eyre::ensure!(
        capacity.total_story_points() == total,
        "expected {total} committed points, found {}",
        capacity.total_story_points()
    );
    eyre::ensure!(
        capacity.completed_story_points() == completed,
        "expected {completed} completed points, found {}",
        capacity.completed_story_points()
    );
    Ok(())
}

#[then("the completion percentage is {percentage:u32}")]
fn completion_percentage_is(world: &SprintWorld, percentage: u32) -> Result<(), eyre::Report> {
    let sprint_id = world.current_sprint()?.id();
    let report = run_async(world.service.sprint_metrics(sprint_id))?;
    eyre::ensure!(
        report.completion_percentage == percentage,
        "expected {percentage}%, found {}%",
        report.completion_percentage
    );
    Ok(())
}

#[then("the sprint velocity is {velocity:u32}")]
fn sprint_velocity_is(world: &SprintWorld, velocity: u32) -> Result<(), eyre::Report> {
    let actual = world.current_sprint()?.metrics().velocity();
    eyre::ensure!(
        actual == velocity,
        "expected velocity {velocity}, found {actual}"
    );
    Ok(())
}

#[then(r#"planning fails because the dates overlap "{name}""#)]
fn planning_overlaps(world: &SprintWorld, name: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;
    let Err(SprintPlanningError::Domain(SprintDomainError::SprintOverlap {
        name: conflicting,
        ..
    })) = result
    else {
        return Err(eyre::eyre!("expected SprintOverlap error, got {result:?}"));
    };
    eyre::ensure!(
        conflicting.as_str() == name,
        "expected overlap with {name}, found {conflicting}"
    );
    Ok(())
}

#[then("the last command succeeds")]
fn last_command_succeeds(world: &SprintWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected success, got {other:?}")),
    }
}

#[then("the last command fails with an invalid transition")]
fn last_command_invalid_transition(world: &SprintWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;
    if !matches!(
        result,
        Err(SprintPlanningError::Domain(
            SprintDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("attaching another task fails because the sprint is closed")]
fn attaching_fails_when_closed(world: &SprintWorld) -> Result<(), eyre::Report> {
    let sprint_id = world.current_sprint()?.id();
    let task = TaskId::new();
    world.tasks.register(task, world.project)?;

    let result = run_async(world.service.attach_task(
        world.manager,
        sprint_id,
        AttachTaskRequest::new(task),
    ));
    eyre::ensure!(
        matches!(
            result,
            Err(SprintPlanningError::Domain(
                SprintDomainError::InvalidTransition { .. }
            ))
        ),
        "expected InvalidTransition error, got {result:?}"
    );
    Ok(())
}
