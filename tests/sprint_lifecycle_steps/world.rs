//! Shared world state for sprint lifecycle BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use sprintwise::sprint::{
    adapters::memory::{
        InMemoryPermissionPolicy, InMemoryProjectDirectory, InMemorySprintRepository,
        InMemoryTaskDirectory,
    },
    domain::{ProjectId, Sprint, TaskId, UserId},
    services::{SprintPlanningResult, SprintPlanningService},
};

/// Service type used by the BDD world.
pub type TestPlanningService = SprintPlanningService<
    InMemorySprintRepository,
    InMemoryProjectDirectory,
    InMemoryTaskDirectory,
    InMemoryPermissionPolicy<InMemoryProjectDirectory>,
    DefaultClock,
>;

/// Scenario world for sprint lifecycle behaviour tests.
pub struct SprintWorld {
    pub service: TestPlanningService,
    pub projects: Arc<InMemoryProjectDirectory>,
    pub tasks: Arc<InMemoryTaskDirectory>,
    pub project: ProjectId,
    pub manager: UserId,
    pub sprint: Option<Sprint>,
    pub attached: Vec<TaskId>,
    pub last_result: Option<SprintPlanningResult<Sprint>>,
}

impl SprintWorld {
    /// Creates a world with no registered projects.
    #[must_use]
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectDirectory::new());
        let tasks = Arc::new(InMemoryTaskDirectory::new());
        let service = SprintPlanningService::new(
            Arc::new(InMemorySprintRepository::new()),
            Arc::clone(&projects),
            Arc::clone(&tasks),
            Arc::new(InMemoryPermissionPolicy::new(Arc::clone(&projects))),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            projects,
            tasks,
            project: ProjectId::new(),
            manager: UserId::new(),
            sprint: None,
            attached: Vec::new(),
            last_result: None,
        }
    }

    /// Returns the sprint planned by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no sprint has been planned yet.
    pub fn current_sprint(&self) -> Result<&Sprint, eyre::Report> {
        self.sprint
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing planned sprint in scenario world"))
    }

    /// Records a command outcome, keeping the latest successful state.
    pub fn record(&mut self, result: SprintPlanningResult<Sprint>) {
        if let Ok(ref updated) = result {
            self.sprint = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for SprintWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SprintWorld {
    SprintWorld::default()
}

/// Returns the instant `offset` days from now.
#[must_use]
pub fn day(offset: u64) -> DateTime<Utc> {
    let days = i64::try_from(offset).unwrap_or_default();
    DefaultClock.utc() + Duration::days(days)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
