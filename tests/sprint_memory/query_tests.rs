//! In-memory integration tests for sprint listing projections.

use super::helpers::{Workspace, workspace};
use rstest::rstest;
use sprintwise::sprint::domain::ProjectId;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_listing_is_newest_first_and_skips_deleted(
    workspace: eyre::Result<Workspace>,
) -> eyre::Result<()> {
    let ws = workspace?;
    let oldest = ws
        .planning
        .create_sprint(ws.manager, ws.sprint_request("Sprint 1", 0, 10))
        .await?;
    let middle = ws
        .planning
        .create_sprint(ws.manager, ws.sprint_request("Sprint 2", 20, 10))
        .await?;
    let newest = ws
        .planning
        .create_sprint(ws.manager, ws.sprint_request("Sprint 3", 40, 10))
        .await?;
    ws.planning.delete_sprint(ws.manager, middle.id()).await?;

    let ids: Vec<_> = ws
        .queries
        .find_by_project(ws.project)
        .await?
        .iter()
        .map(sprintwise::sprint::domain::Sprint::id)
        .collect();
    eyre::ensure!(ids == vec![newest.id(), oldest.id()]);

    let views = ws.queries.project_views(ws.project).await?;
    eyre::ensure!(views.len() == 2);
    eyre::ensure!(views.iter().all(|view| view.metrics.duration_days == 10));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_projects_have_no_sprints(
    workspace: eyre::Result<Workspace>,
) -> eyre::Result<()> {
    let ws = workspace?;
    eyre::ensure!(ws.queries.find_by_project(ProjectId::new()).await?.is_empty());
    eyre::ensure!(ws.queries.project_views(ProjectId::new()).await?.is_empty());
    Ok(())
}
