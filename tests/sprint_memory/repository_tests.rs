//! In-memory repository behaviour: versioned saves and lookups.

use super::helpers::{repo, unsaved_sprint};
use mockable::DefaultClock;
use rstest::rstest;
use sprintwise::sprint::{
    adapters::memory::InMemorySprintRepository,
    domain::{ProjectId, SprintId, UserId},
    ports::{SprintRepository, SprintRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_save_inserts_at_version_one(repo: InMemorySprintRepository) -> eyre::Result<()> {
    let sprint = unsaved_sprint(ProjectId::new(), 0, 14)?;
    let stored = repo.save(&sprint).await?;

    eyre::ensure!(stored.version() == 1);
    eyre::ensure!(repo.find_by_id(sprint.id()).await? == Some(stored));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inserting_the_same_sprint_twice_is_rejected(
    repo: InMemorySprintRepository,
) -> eyre::Result<()> {
    let sprint = unsaved_sprint(ProjectId::new(), 0, 14)?;
    repo.save(&sprint).await?;

    let result = repo.save(&sprint).await;
    eyre::ensure!(matches!(
        result,
        Err(SprintRepositoryError::DuplicateSprint(id)) if id == sprint.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_copies_cannot_overwrite_newer_state(
    repo: InMemorySprintRepository,
) -> eyre::Result<()> {
    let stored = repo.save(&unsaved_sprint(ProjectId::new(), 0, 14)?).await?;
    let mut first_editor = stored.clone();
    let mut second_editor = stored;

    first_editor.start(UserId::new(), &DefaultClock)?;
    let saved = repo.save(&first_editor).await?;
    eyre::ensure!(saved.version() == 2);

    second_editor.cancel(UserId::new(), &DefaultClock)?;
    let result = repo.save(&second_editor).await;
    eyre::ensure!(matches!(
        result,
        Err(SprintRepositoryError::VersionConflict {
            expected: 1,
            found: 2,
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_an_unknown_sprint_reports_not_found(
    repo: InMemorySprintRepository,
) -> eyre::Result<()> {
    let phantom = unsaved_sprint(ProjectId::new(), 0, 14)?.with_version(4);
    let result = repo.save(&phantom).await;
    eyre::ensure!(matches!(
        result,
        Err(SprintRepositoryError::NotFound(id)) if id == phantom.id()
    ));
    eyre::ensure!(repo.find_by_id(SprintId::new()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_sprint_updates_project_lookups(
    repo: InMemorySprintRepository,
) -> eyre::Result<()> {
    let source = ProjectId::new();
    let target = ProjectId::new();
    let mut sprint = repo.save(&unsaved_sprint(source, 0, 14)?).await?;

    sprint.move_to_project(target, UserId::new(), &DefaultClock)?;
    repo.save(&sprint).await?;

    eyre::ensure!(repo.find_by_project(source).await?.is_empty());
    let moved = repo.find_by_project(target).await?;
    eyre::ensure!(moved.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_active_returns_only_running_visible_sprints(
    repo: InMemorySprintRepository,
) -> eyre::Result<()> {
    let project = ProjectId::new();
    let mut draft = repo.save(&unsaved_sprint(project, 0, 14)?).await?;
    draft.start(UserId::new(), &DefaultClock)?;
    let running = repo.save(&draft).await?;

    let mut hidden = repo.save(&unsaved_sprint(project, 20, 14)?).await?;
    hidden.start(UserId::new(), &DefaultClock)?;
    hidden.deactivate(UserId::new(), &DefaultClock);
    repo.save(&hidden).await?;

    repo.save(&unsaved_sprint(project, 40, 14)?).await?;

    eyre::ensure!(repo.find_active().await? == vec![running]);
    eyre::ensure!(repo.find_by_project(project).await?.len() == 3);
    Ok(())
}
