//! In-memory integration tests for sprint planning workflows.

use super::helpers::{Workspace, workspace};
use rstest::rstest;
use sprintwise::sprint::{
    domain::{RetrospectiveNotes, SprintDomainError, SprintStatus, TaskPriority, UserId},
    services::{AttachTaskRequest, SprintPlanningError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_runs_from_planning_to_completion(
    workspace: eyre::Result<Workspace>,
) -> eyre::Result<()> {
    let ws = workspace?;
    let planned = ws
        .planning
        .create_sprint(
            ws.manager,
            ws.sprint_request("Sprint 1", -2, 14)
                .with_team_capacity(20)
                .with_goals(vec!["Launch beta".to_owned()]),
        )
        .await?;
    let sprint_id = planned.id();

    let big = ws.register_task()?;
    let small = ws.register_task()?;
    ws.planning
        .attach_task(
            ws.manager,
            sprint_id,
            AttachTaskRequest::new(big)
                .with_story_points(8)
                .with_priority(TaskPriority::Urgent),
        )
        .await?;
    ws.planning
        .attach_task(
            ws.manager,
            sprint_id,
            AttachTaskRequest::new(small).with_story_points(5),
        )
        .await?;
    ws.planning.start_sprint(ws.manager, sprint_id).await?;
    ws.planning.complete_task(ws.manager, sprint_id, big).await?;
    ws.planning.record_burndown(sprint_id).await?;

    let running = ws.queries.active_views().await?;
    eyre::ensure!(running.len() == 1);
    let view = running
        .first()
        .ok_or_else(|| eyre::eyre!("expected one active sprint"))?;
    eyre::ensure!(view.metrics.completion_percentage == 62);
    eyre::ensure!(view.metrics.velocity == 8);
    eyre::ensure!(view.metrics.remaining_points == 5);
    eyre::ensure!(view.metrics.burndown.len() == 1);

    ws.planning
        .set_goal_completed(ws.manager, sprint_id, 0, true)
        .await?;
    let completed = ws
        .planning
        .complete_sprint(
            ws.manager,
            sprint_id,
            RetrospectiveNotes::new().with_what_went_well(vec!["Shipped".to_owned()]),
        )
        .await?;

    eyre::ensure!(completed.status() == SprintStatus::Completed);
    eyre::ensure!(completed.metrics().velocity() == 8);
    eyre::ensure!(ws.queries.find_active().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detached_work_no_longer_counts(workspace: eyre::Result<Workspace>) -> eyre::Result<()> {
    let ws = workspace?;
    let sprint = ws
        .planning
        .create_sprint(ws.manager, ws.sprint_request("Sprint 1", 1, 14))
        .await?;
    let task = ws.register_task()?;
    ws.planning
        .attach_task(
            ws.manager,
            sprint.id(),
            AttachTaskRequest::new(task).with_story_points(13),
        )
        .await?;

    let detached = ws
        .planning
        .detach_task(ws.manager, sprint.id(), task)
        .await?;
    eyre::ensure!(detached.capacity().total_story_points() == 0);
    eyre::ensure!(detached.task_assignments().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprints_of_one_project_never_overlap(
    workspace: eyre::Result<Workspace>,
) -> eyre::Result<()> {
    let ws = workspace?;
    let first = ws
        .planning
        .create_sprint(ws.manager, ws.sprint_request("Sprint 1", 0, 14))
        .await?;

    let clash = ws
        .planning
        .create_sprint(ws.manager, ws.sprint_request("Sprint 2", 9, 10))
        .await;
    eyre::ensure!(matches!(
        clash,
        Err(SprintPlanningError::Domain(SprintDomainError::SprintOverlap { conflicting, .. }))
            if conflicting == first.id()
    ));

    ws.planning.cancel_sprint(ws.manager, first.id()).await?;
    ws.planning
        .create_sprint(ws.manager, ws.sprint_request("Sprint 2", 9, 10))
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_cannot_change_a_sprint(workspace: eyre::Result<Workspace>) -> eyre::Result<()> {
    let ws = workspace?;
    let sprint = ws
        .planning
        .create_sprint(ws.manager, ws.sprint_request("Sprint 1", 0, 14))
        .await?;
    let stranger = UserId::new();

    let result = ws.planning.start_sprint(stranger, sprint.id()).await;
    eyre::ensure!(matches!(
        result,
        Err(SprintPlanningError::Forbidden { caller, .. }) if caller == stranger
    ));

    ws.projects.register(ws.project, Some(stranger))?;
    let started = ws.planning.start_sprint(stranger, sprint.id()).await?;
    eyre::ensure!(started.status() == SprintStatus::Active);
    Ok(())
}
