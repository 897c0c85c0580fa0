//! Service layer for sprint planning commands.
//!
//! [`SprintPlanningService`] applies the cross-aggregate rules a sprint
//! cannot check on its own: the project must exist, the caller must manage
//! it, attached tasks must belong to it, and the sprint's dates must not
//! collide with another schedulable sprint of the same project. Once those
//! hold it delegates to the aggregate and persists the result.

use crate::sprint::{
    domain::{
        GoalDescription, NewSprint, ProjectId, RetrospectiveNotes, Sprint, SprintDescription,
        SprintDomainError, SprintId, SprintMetricsReport, SprintName, SprintOperation,
        SprintWindow, TaskId, TaskPriority, UserId, ensure_schedulable,
    },
    ports::{
        CollaboratorError, PermissionPolicy, ProjectDirectory, SprintRepository,
        SprintRepositoryError, TaskDirectory,
    },
    services::PlanningConfig,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for planning a new sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSprintRequest {
    project: ProjectId,
    name: String,
    description: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    team_capacity: u32,
    goals: Vec<String>,
}

impl CreateSprintRequest {
    /// Creates a request with required sprint fields.
    #[must_use]
    pub fn new(
        project: ProjectId,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            project,
            name: name.into(),
            description: String::new(),
            start,
            end,
            team_capacity: 0,
            goals: Vec::new(),
        }
    }

    /// Sets the sprint description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the team capacity in story points.
    #[must_use]
    pub const fn with_team_capacity(mut self, team_capacity: u32) -> Self {
        self.team_capacity = team_capacity;
        self
    }

    /// Sets the initial goals.
    #[must_use]
    pub fn with_goals(mut self, goals: impl IntoIterator<Item = String>) -> Self {
        self.goals = goals.into_iter().collect();
        self
    }
}

/// Request payload for editing a sprint. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSprintRequest {
    name: Option<String>,
    description: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    project: Option<ProjectId>,
    team_capacity: Option<u32>,
}

impl UpdateSprintRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new start date.
    #[must_use]
    pub const fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets a new end date.
    #[must_use]
    pub const fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Moves the sprint to another project.
    #[must_use]
    pub const fn with_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    /// Sets a new team capacity.
    #[must_use]
    pub const fn with_team_capacity(mut self, team_capacity: u32) -> Self {
        self.team_capacity = Some(team_capacity);
        self
    }
}

/// Request payload for attaching a task to a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachTaskRequest {
    task: TaskId,
    story_points: u32,
    priority: TaskPriority,
}

impl AttachTaskRequest {
    /// Creates a request for an unestimated, medium-priority task.
    #[must_use]
    pub const fn new(task: TaskId) -> Self {
        Self {
            task,
            story_points: 0,
            priority: TaskPriority::Medium,
        }
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, story_points: u32) -> Self {
        self.story_points = story_points;
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Service-level errors for sprint planning operations.
#[derive(Debug, Error)]
pub enum SprintPlanningError {
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] SprintDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SprintRepositoryError),
    /// A project, task or permission lookup failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
    /// No visible sprint exists with the given identifier.
    #[error("sprint {0} not found")]
    SprintNotFound(SprintId),
    /// No project exists with the given identifier.
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// The task belongs to a different project than the sprint.
    #[error("task {task} belongs to project {task_project}, not {sprint_project}")]
    TaskProjectMismatch {
        /// Task identifier.
        task: TaskId,
        /// Project the task belongs to.
        task_project: ProjectId,
        /// Project the sprint belongs to.
        sprint_project: ProjectId,
    },
    /// The caller neither manages the project nor is an administrator.
    #[error("user {caller} may not manage sprints of project {project}")]
    Forbidden {
        /// Calling user.
        caller: UserId,
        /// Project the command targets.
        project: ProjectId,
    },
}

/// Result type for sprint planning service operations.
pub type SprintPlanningResult<T> = Result<T, SprintPlanningError>;

/// Sprint planning orchestration service.
#[derive(Clone)]
pub struct SprintPlanningService<R, P, T, A, C>
where
    R: SprintRepository,
    P: ProjectDirectory,
    T: TaskDirectory,
    A: PermissionPolicy,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    projects: Arc<P>,
    tasks: Arc<T>,
    permissions: Arc<A>,
    clock: Arc<C>,
    config: PlanningConfig,
}

impl<R, P, T, A, C> SprintPlanningService<R, P, T, A, C>
where
    R: SprintRepository,
    P: ProjectDirectory,
    T: TaskDirectory,
    A: PermissionPolicy,
    C: Clock + Send + Sync,
{
    /// Creates a new planning service with the default [`PlanningConfig`].
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        projects: Arc<P>,
        tasks: Arc<T>,
        permissions: Arc<A>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            projects,
            tasks,
            permissions,
            clock,
            config: PlanningConfig::default(),
        }
    }

    /// Replaces the planning limits.
    #[must_use]
    pub const fn with_config(mut self, config: PlanningConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the planning limits in force.
    #[must_use]
    pub const fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Plans a new sprint in `planning` status.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Domain`] when a field fails validation,
    /// the goal limit is exceeded or the dates overlap another schedulable
    /// sprint of the project, [`SprintPlanningError::ProjectNotFound`] when
    /// the project does not exist, [`SprintPlanningError::Forbidden`] when the
    /// caller may not manage the project, or repository and collaborator
    /// errors.
    #[instrument(skip_all, fields(caller = %caller))]
    pub async fn create_sprint(
        &self,
        caller: UserId,
        request: CreateSprintRequest,
    ) -> SprintPlanningResult<Sprint> {
        let CreateSprintRequest {
            project,
            name,
            description,
            start,
            end,
            team_capacity,
            goals,
        } = request;

        let sprint_name = SprintName::new(name)?;
        let sprint_description = SprintDescription::new(description)?;
        let window = SprintWindow::new(start, end)?;
        let goal_descriptions = goals
            .into_iter()
            .map(GoalDescription::new)
            .collect::<Result<Vec<_>, _>>()?;

        self.ensure_project_exists(project).await?;
        self.authorize(caller, project).await?;
        let existing = self.repository.find_by_project(project).await?;
        check_schedule(project, &window, &existing, None)?;

        let clock = &*self.clock;
        let mut sprint = Sprint::new(
            NewSprint {
                project,
                name: sprint_name,
                description: sprint_description,
                window,
                team_capacity,
                created_by: caller,
            },
            clock,
        );
        for goal in goal_descriptions {
            self.ensure_goal_room(&sprint)?;
            sprint.add_goal(goal, caller, clock)?;
        }

        info!(sprint_id = %sprint.id(), %project, "sprint planned");
        self.commit(sprint, true, SprintOperation::Update).await
    }

    /// Edits a sprint's name, description, dates, project or team capacity.
    ///
    /// Changing the dates or the project re-runs the overlap check against
    /// the target project's sprints, ignoring the sprint itself. Moving to
    /// another project also requires that project to exist, the caller to
    /// manage it, and every assigned task to belong to it.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] when the sprint does
    /// not exist or was deleted, [`SprintPlanningError::Domain`] for
    /// validation, lifecycle or overlap failures,
    /// [`SprintPlanningError::ProjectNotFound`],
    /// [`SprintPlanningError::Forbidden`],
    /// [`SprintPlanningError::TaskProjectMismatch`] when an assigned task
    /// belongs to another project, or repository and collaborator errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn update_sprint(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        request: UpdateSprintRequest,
    ) -> SprintPlanningResult<Sprint> {
        let UpdateSprintRequest {
            name,
            description,
            start,
            end,
            project,
            team_capacity,
        } = request;

        let new_name = name.map(SprintName::new).transpose()?;
        let new_description = description.map(SprintDescription::new).transpose()?;

        let mut sprint = self.load_authorized(caller, sprint_id).await?;
        sprint.ensure_open(SprintOperation::Update)?;

        let current_window = *sprint.window();
        let current_project = sprint.project();
        let (current_start, current_end) = (current_window.start(), current_window.end());
        let window = SprintWindow::new(start.unwrap_or(current_start), end.unwrap_or(current_end))?;
        let target_project = project.unwrap_or(current_project);
        let moves_project = target_project != current_project;
        let moves_window = window != current_window;

        if moves_project {
            self.ensure_project_exists(target_project).await?;
            self.authorize(caller, target_project).await?;
            self.ensure_tasks_belong_to(&sprint, target_project).await?;
        }
        if moves_project || moves_window {
            let existing = self.repository.find_by_project(target_project).await?;
            check_schedule(target_project, &window, &existing, Some(sprint_id))?;
        }

        let clock = &*self.clock;
        let mut changed = false;
        if let Some(value) = new_name {
            sprint.rename(value, caller, clock)?;
            changed = true;
        }
        if let Some(value) = new_description {
            sprint.describe(value, caller, clock)?;
            changed = true;
        }
        if moves_window {
            sprint.reschedule(window, caller, clock)?;
            changed = true;
        }
        if moves_project {
            sprint.move_to_project(target_project, caller, clock)?;
            changed = true;
        }
        if let Some(points) = team_capacity {
            sprint.set_team_capacity(points, caller, clock)?;
            changed = true;
        }

        self.commit(sprint, changed, SprintOperation::Update).await
    }

    /// Commits a task to a sprint. Attaching an already attached task is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`],
    /// [`SprintPlanningError::TaskNotFound`] when the task does not exist,
    /// [`SprintPlanningError::TaskProjectMismatch`] when it belongs to another
    /// project, [`SprintPlanningError::Forbidden`],
    /// [`SprintPlanningError::Domain`] when the sprint is closed or full, or
    /// repository and collaborator errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn attach_task(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        request: AttachTaskRequest,
    ) -> SprintPlanningResult<Sprint> {
        let AttachTaskRequest {
            task,
            story_points,
            priority,
        } = request;

        let mut sprint = self.load_authorized(caller, sprint_id).await?;
        sprint.ensure_open(SprintOperation::AttachTask)?;

        if !self.tasks.exists(task).await? {
            return Err(SprintPlanningError::TaskNotFound(task));
        }
        let task_project = self
            .tasks
            .project_of(task)
            .await?
            .ok_or(SprintPlanningError::TaskNotFound(task))?;
        if task_project != sprint.project() {
            warn!(%task, %task_project, "task belongs to another project");
            return Err(SprintPlanningError::TaskProjectMismatch {
                task,
                task_project,
                sprint_project: sprint.project(),
            });
        }

        let is_new = sprint.assignment(task).is_none();
        if is_new && sprint.task_assignments().len() >= self.config.max_task_assignments {
            return Err(SprintDomainError::TaskLimitReached {
                sprint_id,
                limit: self.config.max_task_assignments,
            }
            .into());
        }

        let changed = sprint.attach_task(task, story_points, priority, caller, &*self.clock)?;
        self.commit(sprint, changed, SprintOperation::AttachTask)
            .await
    }

    /// Removes a task from a sprint. Detaching an absent task is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`],
    /// [`SprintPlanningError::Forbidden`], [`SprintPlanningError::Domain`]
    /// when the sprint is closed, or repository and collaborator errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn detach_task(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        task: TaskId,
    ) -> SprintPlanningResult<Sprint> {
        self.apply(
            caller,
            sprint_id,
            SprintOperation::DetachTask,
            |sprint, actor, clock| sprint.detach_task(task, actor, clock),
        )
        .await
    }

    /// Marks an assigned task complete, counting its points as delivered
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`],
    /// [`SprintPlanningError::Forbidden`], [`SprintPlanningError::Domain`]
    /// when the sprint is closed or the task is not assigned, or repository
    /// and collaborator errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn complete_task(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        task: TaskId,
    ) -> SprintPlanningResult<Sprint> {
        self.apply(
            caller,
            sprint_id,
            SprintOperation::CompleteTask,
            |sprint, actor, clock| sprint.mark_task_complete(task, actor, clock),
        )
        .await
    }

    /// Starts a planning sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`],
    /// [`SprintPlanningError::Forbidden`], [`SprintPlanningError::Domain`]
    /// with an invalid transition, or repository and collaborator errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn start_sprint(
        &self,
        caller: UserId,
        sprint_id: SprintId,
    ) -> SprintPlanningResult<Sprint> {
        self.apply(
            caller,
            sprint_id,
            SprintOperation::Start,
            |sprint, actor, clock| sprint.start(actor, clock).map(|()| true),
        )
        .await
    }

    /// Completes an active sprint with its retrospective.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`],
    /// [`SprintPlanningError::Forbidden`], [`SprintPlanningError::Domain`]
    /// with an invalid transition, or repository and collaborator errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn complete_sprint(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        notes: RetrospectiveNotes,
    ) -> SprintPlanningResult<Sprint> {
        self.apply(
            caller,
            sprint_id,
            SprintOperation::Complete,
            |sprint, actor, clock| sprint.complete(notes, actor, clock).map(|()| true),
        )
        .await
    }

    /// Cancels a planning or active sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`],
    /// [`SprintPlanningError::Forbidden`], [`SprintPlanningError::Domain`]
    /// with an invalid transition, or repository and collaborator errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn cancel_sprint(
        &self,
        caller: UserId,
        sprint_id: SprintId,
    ) -> SprintPlanningResult<Sprint> {
        self.apply(
            caller,
            sprint_id,
            SprintOperation::Cancel,
            |sprint, actor, clock| sprint.cancel(actor, clock).map(|()| true),
        )
        .await
    }

    /// Appends a goal.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Domain`] when the description is
    /// invalid, the goal limit is reached or the sprint is closed, as well as
    /// lookup, authorization and repository errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn add_goal(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        description: impl Into<String> + Send,
    ) -> SprintPlanningResult<Sprint> {
        let goal = GoalDescription::new(description)?;
        let mut sprint = self.load_authorized(caller, sprint_id).await?;
        sprint.ensure_open(SprintOperation::EditGoals)?;
        self.ensure_goal_room(&sprint)?;
        sprint.add_goal(goal, caller, &*self.clock)?;
        self.commit(sprint, true, SprintOperation::EditGoals).await
    }

    /// Rewrites the goal at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Domain`] when the description is
    /// invalid, no goal exists at `index` or the sprint is closed, as well as
    /// lookup, authorization and repository errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id, index))]
    pub async fn edit_goal(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        index: usize,
        description: impl Into<String> + Send,
    ) -> SprintPlanningResult<Sprint> {
        let goal = GoalDescription::new(description)?;
        self.apply(
            caller,
            sprint_id,
            SprintOperation::EditGoals,
            |sprint, actor, clock| sprint.edit_goal(index, goal, actor, clock).map(|()| true),
        )
        .await
    }

    /// Marks the goal at `index` as met or unmet.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::Domain`] when no goal exists at `index`
    /// or the sprint is closed, as well as lookup, authorization and
    /// repository errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id, index))]
    pub async fn set_goal_completed(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        index: usize,
        completed: bool,
    ) -> SprintPlanningResult<Sprint> {
        self.apply(
            caller,
            sprint_id,
            SprintOperation::EditGoals,
            |sprint, actor, clock| {
                sprint
                    .set_goal_completed(index, completed, actor, clock)
                    .map(|()| true)
            },
        )
        .await
    }

    /// Soft-deletes a sprint. It stays in storage but disappears from
    /// lookups, projections and overlap detection.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] when the sprint does
    /// not exist or is already deleted, [`SprintPlanningError::Forbidden`],
    /// or repository and collaborator errors.
    #[instrument(skip_all, fields(caller = %caller, sprint_id = %sprint_id))]
    pub async fn delete_sprint(
        &self,
        caller: UserId,
        sprint_id: SprintId,
    ) -> SprintPlanningResult<Sprint> {
        self.apply(
            caller,
            sprint_id,
            SprintOperation::Update,
            |sprint, actor, clock| Ok(sprint.deactivate(actor, clock)),
        )
        .await
    }

    /// Appends today's burndown reading to an active sprint.
    ///
    /// Invoked by the daily scheduler rather than a user, so no caller is
    /// authorized. A second reading on the same day is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`],
    /// [`SprintPlanningError::Domain`] when the sprint is not active, or
    /// repository errors.
    #[instrument(skip(self))]
    pub async fn record_burndown(&self, sprint_id: SprintId) -> SprintPlanningResult<Sprint> {
        let mut sprint = self.find_visible(sprint_id).await?;
        let changed = sprint.record_burndown(&*self.clock)?;
        self.commit(sprint, changed, SprintOperation::RecordBurndown)
            .await
    }

    /// Retrieves a sprint that has not been deleted.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] when the sprint does
    /// not exist or was deleted, or repository errors.
    pub async fn get_sprint(&self, sprint_id: SprintId) -> SprintPlanningResult<Sprint> {
        self.find_visible(sprint_id).await
    }

    /// Derives the metrics report for a sprint at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SprintPlanningError::SprintNotFound`] when the sprint does
    /// not exist or was deleted, or repository errors.
    pub async fn sprint_metrics(
        &self,
        sprint_id: SprintId,
    ) -> SprintPlanningResult<SprintMetricsReport> {
        let sprint = self.find_visible(sprint_id).await?;
        Ok(SprintMetricsReport::compute(&sprint, &*self.clock))
    }

    /// Loads, authorizes, mutates and persists a sprint in one step.
    async fn apply<F>(
        &self,
        caller: UserId,
        sprint_id: SprintId,
        operation: SprintOperation,
        change: F,
    ) -> SprintPlanningResult<Sprint>
    where
        F: FnOnce(&mut Sprint, UserId, &C) -> Result<bool, SprintDomainError> + Send,
    {
        let mut sprint = self.load_authorized(caller, sprint_id).await?;
        let changed = change(&mut sprint, caller, &*self.clock)?;
        self.commit(sprint, changed, operation).await
    }

    async fn commit(
        &self,
        sprint: Sprint,
        changed: bool,
        operation: SprintOperation,
    ) -> SprintPlanningResult<Sprint> {
        if !changed {
            debug!(sprint_id = %sprint.id(), ?operation, "nothing to persist");
            return Ok(sprint);
        }

        match self.repository.save(&sprint).await {
            Ok(saved) => {
                info!(
                    sprint_id = %saved.id(),
                    status = %saved.status(),
                    version = saved.version(),
                    ?operation,
                    "sprint saved"
                );
                Ok(saved)
            }
            Err(err) => {
                if matches!(err, SprintRepositoryError::VersionConflict { .. }) {
                    warn!(sprint_id = %sprint.id(), ?operation, error = %err, "lost update rejected");
                }
                Err(err.into())
            }
        }
    }

    async fn find_visible(&self, sprint_id: SprintId) -> SprintPlanningResult<Sprint> {
        self.repository
            .find_by_id(sprint_id)
            .await?
            .filter(Sprint::is_active)
            .ok_or(SprintPlanningError::SprintNotFound(sprint_id))
    }

    async fn load_authorized(
        &self,
        caller: UserId,
        sprint_id: SprintId,
    ) -> SprintPlanningResult<Sprint> {
        let sprint = self.find_visible(sprint_id).await?;
        self.authorize(caller, sprint.project()).await?;
        Ok(sprint)
    }

    async fn ensure_project_exists(&self, project: ProjectId) -> SprintPlanningResult<()> {
        if self.projects.exists(project).await? {
            return Ok(());
        }
        Err(SprintPlanningError::ProjectNotFound(project))
    }

    async fn ensure_tasks_belong_to(
        &self,
        sprint: &Sprint,
        project: ProjectId,
    ) -> SprintPlanningResult<()> {
        for assignment in sprint.task_assignments() {
            let task = assignment.task();
            let Some(task_project) = self.tasks.project_of(task).await? else {
                continue;
            };
            if task_project != project {
                warn!(%task, %task_project, %project, "assigned task stays in its project");
                return Err(SprintPlanningError::TaskProjectMismatch {
                    task,
                    task_project,
                    sprint_project: project,
                });
            }
        }
        Ok(())
    }

    async fn authorize(&self, caller: UserId, project: ProjectId) -> SprintPlanningResult<()> {
        if self.permissions.is_manager_or_admin(caller, project).await? {
            return Ok(());
        }
        warn!(%caller, %project, "caller is neither project manager nor admin");
        Err(SprintPlanningError::Forbidden { caller, project })
    }

    fn ensure_goal_room(&self, sprint: &Sprint) -> Result<(), SprintDomainError> {
        if sprint.goals().len() >= self.config.max_goals {
            return Err(SprintDomainError::GoalLimitReached {
                sprint_id: sprint.id(),
                limit: self.config.max_goals,
            });
        }
        Ok(())
    }
}

fn check_schedule(
    project: ProjectId,
    window: &SprintWindow,
    existing: &[Sprint],
    exclude: Option<SprintId>,
) -> Result<(), SprintDomainError> {
    ensure_schedulable(project, window, existing, exclude).inspect_err(|err| {
        warn!(%project, error = %err, "sprint dates rejected");
    })
}
