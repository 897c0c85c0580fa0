//! Sprint aggregate root.

use super::{
    BurndownPoint, GoalDescription, ProjectId, Retrospective, RetrospectiveNotes, SprintCapacity,
    SprintDescription, SprintDomainError, SprintGoal, SprintId, SprintMetrics, SprintName,
    SprintOperation, SprintStatus, SprintWindow, TaskAssignment, TaskId, TaskPriority, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Sprint aggregate root.
///
/// Every change to task assignments, capacity and metrics goes through the
/// methods on this type so that the capacity invariants hold after each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    project: ProjectId,
    name: SprintName,
    description: SprintDescription,
    window: SprintWindow,
    status: SprintStatus,
    goals: Vec<SprintGoal>,
    task_assignments: Vec<TaskAssignment>,
    capacity: SprintCapacity,
    metrics: SprintMetrics,
    retrospective: Option<Retrospective>,
    is_active: bool,
    created_by: UserId,
    updated_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

/// Parameter object for planning a new sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSprint {
    /// Owning project.
    pub project: ProjectId,
    /// Sprint name.
    pub name: SprintName,
    /// Sprint description.
    pub description: SprintDescription,
    /// Planned date range.
    pub window: SprintWindow,
    /// Effort the team can deliver, in story points.
    pub team_capacity: u32,
    /// User creating the sprint.
    pub created_by: UserId,
}

/// Parameter object for reconstructing a persisted sprint aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSprintData {
    /// Persisted sprint identifier.
    pub id: SprintId,
    /// Persisted owning project.
    pub project: ProjectId,
    /// Persisted name.
    pub name: SprintName,
    /// Persisted description.
    pub description: SprintDescription,
    /// Persisted date range.
    pub window: SprintWindow,
    /// Persisted lifecycle status.
    pub status: SprintStatus,
    /// Persisted goals in order.
    pub goals: Vec<SprintGoal>,
    /// Persisted task assignments.
    pub task_assignments: Vec<TaskAssignment>,
    /// Persisted capacity record.
    pub capacity: SprintCapacity,
    /// Persisted metrics.
    pub metrics: SprintMetrics,
    /// Persisted retrospective, if completed.
    pub retrospective: Option<Retrospective>,
    /// Persisted soft-delete flag.
    pub is_active: bool,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted last editor.
    pub updated_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
}

impl Sprint {
    /// Creates a new sprint in [`SprintStatus::Planning`].
    ///
    /// The returned sprint has version `0` until a repository stores it.
    #[must_use]
    pub fn new(new_sprint: NewSprint, clock: &impl Clock) -> Self {
        let NewSprint {
            project,
            name,
            description,
            window,
            team_capacity,
            created_by,
        } = new_sprint;
        let timestamp = clock.utc();

        Self {
            id: SprintId::new(),
            project,
            name,
            description,
            window,
            status: SprintStatus::Planning,
            goals: Vec::new(),
            task_assignments: Vec::new(),
            capacity: SprintCapacity::with_team_capacity(team_capacity),
            metrics: SprintMetrics::default(),
            retrospective: None,
            is_active: true,
            created_by,
            updated_by: created_by,
            created_at: timestamp,
            updated_at: timestamp,
            version: 0,
        }
    }

    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData) -> Self {
        Self {
            id: data.id,
            project: data.project,
            name: data.name,
            description: data.description,
            window: data.window,
            status: data.status,
            goals: data.goals,
            task_assignments: data.task_assignments,
            capacity: data.capacity,
            metrics: data.metrics,
            retrospective: data.retrospective,
            is_active: data.is_active,
            created_by: data.created_by,
            updated_by: data.updated_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the sprint stamped with the version assigned by a repository.
    #[must_use]
    pub const fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the sprint name.
    #[must_use]
    pub const fn name(&self) -> &SprintName {
        &self.name
    }

    /// Returns the sprint description.
    #[must_use]
    pub const fn description(&self) -> &SprintDescription {
        &self.description
    }

    /// Returns the planned date range.
    #[must_use]
    pub const fn window(&self) -> &SprintWindow {
        &self.window
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SprintStatus {
        self.status
    }

    /// Returns the goals in order.
    #[must_use]
    pub fn goals(&self) -> &[SprintGoal] {
        &self.goals
    }

    /// Returns the task assignments in attachment order.
    #[must_use]
    pub fn task_assignments(&self) -> &[TaskAssignment] {
        &self.task_assignments
    }

    /// Returns the assignment for `task`, if attached.
    #[must_use]
    pub fn assignment(&self, task: TaskId) -> Option<&TaskAssignment> {
        self.task_assignments
            .iter()
            .find(|assignment| assignment.task() == task)
    }

    /// Returns the capacity record.
    #[must_use]
    pub const fn capacity(&self) -> &SprintCapacity {
        &self.capacity
    }

    /// Returns the persisted metrics.
    #[must_use]
    pub const fn metrics(&self) -> &SprintMetrics {
        &self.metrics
    }

    /// Returns the retrospective recorded at completion, if any.
    #[must_use]
    pub const fn retrospective(&self) -> Option<&Retrospective> {
        self.retrospective.as_ref()
    }

    /// Returns `false` once the sprint has been soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the last editor.
    #[must_use]
    pub const fn updated_by(&self) -> UserId {
        self.updated_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic-concurrency version. Zero means never stored.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Moves the sprint from planning to active.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] unless the sprint is
    /// in [`SprintStatus::Planning`].
    pub fn start(&mut self, actor: UserId, clock: &impl Clock) -> Result<(), SprintDomainError> {
        self.transition_to(SprintStatus::Active, SprintOperation::Start)?;
        self.touch(actor, clock);
        Ok(())
    }

    /// Completes an active sprint, recording the retrospective and freezing
    /// velocity at the delivered story points.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] unless the sprint is
    /// in [`SprintStatus::Active`].
    pub fn complete(
        &mut self,
        notes: RetrospectiveNotes,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.transition_to(SprintStatus::Completed, SprintOperation::Complete)?;
        self.metrics
            .set_velocity(self.capacity.completed_story_points());
        self.retrospective = Some(Retrospective::from_notes(notes, clock.utc()));
        self.touch(actor, clock);
        Ok(())
    }

    /// Cancels a planning or active sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// already completed or cancelled.
    pub fn cancel(&mut self, actor: UserId, clock: &impl Clock) -> Result<(), SprintDomainError> {
        self.transition_to(SprintStatus::Cancelled, SprintOperation::Cancel)?;
        self.touch(actor, clock);
        Ok(())
    }

    /// Commits a task to the sprint.
    ///
    /// Attaching a task that is already assigned changes nothing and returns
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled, or [`SprintDomainError::StoryPointsOverflow`]
    /// when the committed total cannot hold the task's points.
    pub fn attach_task(
        &mut self,
        task: TaskId,
        story_points: u32,
        priority: TaskPriority,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<bool, SprintDomainError> {
        self.ensure_open(SprintOperation::AttachTask)?;
        if self.assignment(task).is_some() {
            return Ok(false);
        }

        if !self.capacity.commit(story_points) {
            return Err(SprintDomainError::StoryPointsOverflow {
                sprint_id: self.id,
                task_id: task,
                committed: self.capacity.total_story_points(),
                story_points,
            });
        }
        self.task_assignments
            .push(TaskAssignment::new(task, story_points, priority));
        self.recompute_velocity();
        self.touch(actor, clock);
        Ok(true)
    }

    /// Removes a task from the sprint, retracting its points. Points already
    /// counted as delivered are retracted too.
    ///
    /// Detaching a task that is not assigned changes nothing and returns
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled.
    pub fn detach_task(
        &mut self,
        task: TaskId,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<bool, SprintDomainError> {
        self.ensure_open(SprintOperation::DetachTask)?;
        let Some(position) = self
            .task_assignments
            .iter()
            .position(|assignment| assignment.task() == task)
        else {
            return Ok(false);
        };

        let removed = self.task_assignments.remove(position);
        self.capacity
            .retract(removed.story_points(), removed.is_completed());
        self.recompute_velocity();
        self.touch(actor, clock);
        Ok(true)
    }

    /// Marks an assigned task complete and counts its points as delivered.
    ///
    /// Points are counted once per assignment; repeating the call returns
    /// `Ok(false)` without changing capacity.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled, or [`SprintDomainError::TaskNotAssigned`] when
    /// the task is not part of the sprint.
    pub fn mark_task_complete(
        &mut self,
        task: TaskId,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<bool, SprintDomainError> {
        self.ensure_open(SprintOperation::CompleteTask)?;
        let sprint_id = self.id;
        let assignment = self
            .task_assignments
            .iter_mut()
            .find(|assignment| assignment.task() == task)
            .ok_or(SprintDomainError::TaskNotAssigned {
                sprint_id,
                task_id: task,
            })?;

        if !assignment.mark_completed() {
            return Ok(false);
        }
        let points = assignment.story_points();
        self.capacity.deliver(points);
        self.recompute_velocity();
        self.touch(actor, clock);
        Ok(true)
    }

    /// Appends a goal.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled.
    pub fn add_goal(
        &mut self,
        description: GoalDescription,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_open(SprintOperation::EditGoals)?;
        self.goals.push(SprintGoal::new(description));
        self.touch(actor, clock);
        Ok(())
    }

    /// Replaces the description of the goal at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled, or [`SprintDomainError::GoalNotFound`] when
    /// `index` is out of range.
    pub fn edit_goal(
        &mut self,
        index: usize,
        description: GoalDescription,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_open(SprintOperation::EditGoals)?;
        self.goal_mut(index)?.set_description(description);
        self.touch(actor, clock);
        Ok(())
    }

    /// Marks the goal at `index` as met or unmet.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled, or [`SprintDomainError::GoalNotFound`] when
    /// `index` is out of range.
    pub fn set_goal_completed(
        &mut self,
        index: usize,
        completed: bool,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_open(SprintOperation::EditGoals)?;
        self.goal_mut(index)?.set_completed(completed);
        self.touch(actor, clock);
        Ok(())
    }

    /// Renames the sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled.
    pub fn rename(
        &mut self,
        name: SprintName,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_open(SprintOperation::Update)?;
        self.name = name;
        self.touch(actor, clock);
        Ok(())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled.
    pub fn describe(
        &mut self,
        description: SprintDescription,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_open(SprintOperation::Update)?;
        self.description = description;
        self.touch(actor, clock);
        Ok(())
    }

    /// Moves the sprint to a new date range. Overlap with other sprints is
    /// checked by the caller, which can see the project's other sprints.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled.
    pub fn reschedule(
        &mut self,
        window: SprintWindow,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_open(SprintOperation::Update)?;
        self.window = window;
        self.touch(actor, clock);
        Ok(())
    }

    /// Reassigns the sprint to another project.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled.
    pub fn move_to_project(
        &mut self,
        project: ProjectId,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_open(SprintOperation::Update)?;
        self.project = project;
        self.touch(actor, clock);
        Ok(())
    }

    /// Sets the effort the team can deliver.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled.
    pub fn set_team_capacity(
        &mut self,
        team_capacity: u32,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_open(SprintOperation::Update)?;
        self.capacity.set_team_capacity(team_capacity);
        self.touch(actor, clock);
        Ok(())
    }

    /// Appends today's remaining-points reading to the burndown series.
    ///
    /// At most one reading is kept per UTC calendar day; a second reading on
    /// the same day returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] unless the sprint is
    /// in [`SprintStatus::Active`].
    pub fn record_burndown(&mut self, clock: &impl Clock) -> Result<bool, SprintDomainError> {
        if self.status != SprintStatus::Active {
            return Err(self.invalid(SprintOperation::RecordBurndown));
        }

        let now = clock.utc();
        let point = BurndownPoint::new(now.date_naive(), self.capacity.remaining_story_points());
        if !self.metrics.append(point) {
            return Ok(false);
        }
        self.updated_at = now;
        Ok(true)
    }

    /// Soft-deletes the sprint. The record is retained but hidden from
    /// projections and overlap detection. Returns `false` if it was already
    /// deleted.
    pub fn deactivate(&mut self, actor: UserId, clock: &impl Clock) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_active = false;
        self.touch(actor, clock);
        true
    }

    fn goal_mut(&mut self, index: usize) -> Result<&mut SprintGoal, SprintDomainError> {
        let sprint_id = self.id;
        self.goals
            .get_mut(index)
            .ok_or(SprintDomainError::GoalNotFound { sprint_id, index })
    }

    /// Checks that `operation` may still change the sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the sprint is
    /// completed or cancelled.
    pub fn ensure_open(&self, operation: SprintOperation) -> Result<(), SprintDomainError> {
        if self.status.is_terminal() {
            return Err(self.invalid(operation));
        }
        Ok(())
    }

    fn transition_to(
        &mut self,
        target: SprintStatus,
        operation: SprintOperation,
    ) -> Result<(), SprintDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(self.invalid(operation));
        }
        self.status = target;
        Ok(())
    }

    const fn invalid(&self, operation: SprintOperation) -> SprintDomainError {
        SprintDomainError::InvalidTransition {
            sprint_id: self.id,
            from: self.status,
            operation,
        }
    }

    /// Keeps velocity in step with delivered points until completion freezes
    /// it.
    const fn recompute_velocity(&mut self) {
        if matches!(self.status, SprintStatus::Completed) {
            return;
        }
        self.metrics
            .set_velocity(self.capacity.completed_story_points());
    }

    fn touch(&mut self, actor: UserId, clock: &impl Clock) {
        self.updated_by = actor;
        self.updated_at = clock.utc();
    }
}
