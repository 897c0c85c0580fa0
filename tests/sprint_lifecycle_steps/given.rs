//! Given steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, day, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use sprintwise::sprint::{
    domain::TaskId,
    services::{AttachTaskRequest, CreateSprintRequest},
};

#[given("a project managed by the current user")]
fn managed_project(world: &mut SprintWorld) -> Result<(), eyre::Report> {
    world
        .projects
        .register(world.project, Some(world.manager))
        .wrap_err("register scenario project")?;
    Ok(())
}

#[given(r#"a planned sprint "{name}" running from day {offset:u64} for {days:u64} days"#)]
fn planned_sprint(
    world: &mut SprintWorld,
    name: String,
    offset: u64,
    days: u64,
) -> Result<(), eyre::Report> {
    let request = CreateSprintRequest::new(
        world.project,
        name,
        day(offset),
        day(offset.saturating_add(days)),
    )
    .with_team_capacity(20);
    let created = run_async(world.service.create_sprint(world.manager, request))
        .wrap_err("plan sprint for scenario")?;
    world.sprint = Some(created);
    Ok(())
}

#[given("a task worth {points:u32} story points is attached")]
fn task_attached(world: &mut SprintWorld, points: u32) -> Result<(), eyre::Report> {
    let sprint_id = world.current_sprint()?.id();
    let task = TaskId::new();
    world
        .tasks
        .register(task, world.project)
        .wrap_err("register scenario task")?;

    let updated = run_async(world.service.attach_task(
        world.manager,
        sprint_id,
        AttachTaskRequest::new(task).with_story_points(points),
    ))
    .wrap_err("attach task in scenario setup")?;
    world.sprint = Some(updated);
    world.attached.push(task);
    Ok(())
}
