//! Error types for sprint domain validation, transitions and parsing.

use super::{SprintId, SprintName, SprintOperation, SprintStatus, TaskId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating sprint domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SprintDomainError {
    /// The sprint name is empty after trimming.
    #[error("sprint name must not be empty")]
    EmptySprintName,

    /// The sprint name exceeds the storage limit.
    #[error("sprint name is {length} characters, limit is {max}")]
    SprintNameTooLong {
        /// Length of the rejected value in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// The sprint description exceeds the storage limit.
    #[error("sprint description is {length} characters, limit is {max}")]
    SprintDescriptionTooLong {
        /// Length of the rejected value in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// A goal description is empty after trimming.
    #[error("goal description must not be empty")]
    EmptyGoalDescription,

    /// A goal description exceeds the storage limit.
    #[error("goal description is {length} characters, limit is {max}")]
    GoalDescriptionTooLong {
        /// Length of the rejected value in characters.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// The sprint end date does not fall after its start date.
    #[error("sprint end {end} must be after start {start}")]
    InvalidDateRange {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },

    /// The operation is not permitted from the sprint's current status.
    #[error("cannot {operation} sprint {sprint_id} while it is {from}")]
    InvalidTransition {
        /// Sprint identifier.
        sprint_id: SprintId,
        /// Status at the time of the attempt.
        from: SprintStatus,
        /// Attempted operation.
        operation: SprintOperation,
    },

    /// The requested date range collides with another schedulable sprint.
    #[error("date range overlaps sprint '{name}' ({conflicting})")]
    SprintOverlap {
        /// Identifier of the conflicting sprint.
        conflicting: SprintId,
        /// Name of the conflicting sprint.
        name: SprintName,
    },

    /// Attaching the task would overflow the committed story point total.
    #[error(
        "sprint {sprint_id} cannot commit {story_points} points for task {task_id} on top of {committed}"
    )]
    StoryPointsOverflow {
        /// Sprint identifier.
        sprint_id: SprintId,
        /// Task identifier.
        task_id: TaskId,
        /// Points already committed.
        committed: u32,
        /// Points carried by the rejected task.
        story_points: u32,
    },

    /// The task is not assigned to the sprint.
    #[error("task {task_id} is not assigned to sprint {sprint_id}")]
    TaskNotAssigned {
        /// Sprint identifier.
        sprint_id: SprintId,
        /// Task identifier.
        task_id: TaskId,
    },

    /// No goal exists at the given position.
    #[error("sprint {sprint_id} has no goal at position {index}")]
    GoalNotFound {
        /// Sprint identifier.
        sprint_id: SprintId,
        /// Requested goal position.
        index: usize,
    },

    /// The sprint already holds the maximum number of goals.
    #[error("sprint {sprint_id} already has the maximum of {limit} goals")]
    GoalLimitReached {
        /// Sprint identifier.
        sprint_id: SprintId,
        /// Configured goal limit.
        limit: usize,
    },

    /// The sprint already holds the maximum number of task assignments.
    #[error("sprint {sprint_id} already has the maximum of {limit} task assignments")]
    TaskLimitReached {
        /// Sprint identifier.
        sprint_id: SprintId,
        /// Configured assignment limit.
        limit: usize,
    },
}

/// Error returned while parsing sprint statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
