//! Task assignments owned by a sprint.

use super::{ParseTaskPriorityError, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of a task within a sprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can slip to a later sprint.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Should land this sprint.
    High,
    /// Blocks other work.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// A task committed to a sprint with its estimate.
///
/// Assignments have no identity outside the sprint that holds them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskAssignment {
    task: TaskId,
    story_points: u32,
    priority: TaskPriority,
    #[serde(default)]
    completed: bool,
}

impl TaskAssignment {
    /// Creates an incomplete assignment.
    #[must_use]
    pub const fn new(task: TaskId, story_points: u32, priority: TaskPriority) -> Self {
        Self {
            task,
            story_points,
            priority,
            completed: false,
        }
    }

    /// Returns the assigned task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the story point estimate.
    #[must_use]
    pub const fn story_points(&self) -> u32 {
        self.story_points
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns whether the task has been marked complete in this sprint.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flags the assignment complete. Returns `true` only on the first call.
    pub(crate) const fn mark_completed(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}
