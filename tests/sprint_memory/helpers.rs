//! Shared fixtures for in-memory sprint integration tests.

use chrono::{DateTime, Duration, Utc};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use sprintwise::sprint::{
    adapters::memory::{
        InMemoryPermissionPolicy, InMemoryProjectDirectory, InMemorySprintRepository,
        InMemoryTaskDirectory,
    },
    domain::{
        NewSprint, ProjectId, Sprint, SprintDescription, SprintName, SprintWindow, TaskId, UserId,
    },
    services::{CreateSprintRequest, SprintPlanningService, SprintQueryService},
};
use std::sync::Arc;

/// Planning service wired to in-memory adapters.
pub type MemoryPlanningService = SprintPlanningService<
    InMemorySprintRepository,
    InMemoryProjectDirectory,
    InMemoryTaskDirectory,
    InMemoryPermissionPolicy<InMemoryProjectDirectory>,
    DefaultClock,
>;

/// Services and directories sharing one in-memory store.
pub struct Workspace {
    /// Planning commands.
    pub planning: MemoryPlanningService,
    /// Listing queries over the same repository.
    pub queries: SprintQueryService<InMemorySprintRepository, DefaultClock>,
    /// Registered tasks.
    pub tasks: Arc<InMemoryTaskDirectory>,
    /// Registered projects.
    pub projects: Arc<InMemoryProjectDirectory>,
    /// Project under test.
    pub project: ProjectId,
    /// Manager of `project`.
    pub manager: UserId,
}

impl Workspace {
    /// Registers a task belonging to the workspace project.
    ///
    /// # Errors
    ///
    /// Returns an error if the task directory cannot be written.
    pub fn register_task(&self) -> eyre::Result<TaskId> {
        let task = TaskId::new();
        self.tasks.register(task, self.project)?;
        Ok(task)
    }

    /// Builds a request for a sprint spanning `days` days from `offset` days
    /// after today.
    #[must_use]
    pub fn sprint_request(&self, name: &str, offset: i64, days: i64) -> CreateSprintRequest {
        let start = day(offset);
        CreateSprintRequest::new(self.project, name, start, start + Duration::days(days))
    }
}

/// Provides a workspace with one project and its manager.
///
/// # Errors
///
/// Returns an error if the project directory cannot be written.
#[fixture]
pub fn workspace() -> eyre::Result<Workspace> {
    let repository = Arc::new(InMemorySprintRepository::new());
    let projects = Arc::new(InMemoryProjectDirectory::new());
    let tasks = Arc::new(InMemoryTaskDirectory::new());
    let permissions = Arc::new(InMemoryPermissionPolicy::new(Arc::clone(&projects)));
    let clock = Arc::new(DefaultClock);
    let project = ProjectId::new();
    let manager = UserId::new();
    projects.register(project, Some(manager))?;

    Ok(Workspace {
        planning: SprintPlanningService::new(
            Arc::clone(&repository),
            Arc::clone(&projects),
            Arc::clone(&tasks),
            permissions,
            Arc::clone(&clock),
        ),
        queries: SprintQueryService::new(repository, clock),
        tasks,
        projects,
        project,
        manager,
    })
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemorySprintRepository {
    InMemorySprintRepository::new()
}

/// Returns the instant `offset` days from now.
#[must_use]
pub fn day(offset: i64) -> DateTime<Utc> {
    DefaultClock.utc() + Duration::days(offset)
}

/// Builds an unsaved planning sprint for `project`.
///
/// # Errors
///
/// Returns an error if the sample name or dates are rejected.
pub fn unsaved_sprint(project: ProjectId, offset: i64, days: i64) -> eyre::Result<Sprint> {
    let start = day(offset);
    let window = SprintWindow::new(start, start + Duration::days(days))?;
    Ok(Sprint::new(
        NewSprint {
            project,
            name: SprintName::new("Integration sprint")?,
            description: SprintDescription::default(),
            window,
            team_capacity: 20,
            created_by: UserId::new(),
        },
        &DefaultClock,
    ))
}
