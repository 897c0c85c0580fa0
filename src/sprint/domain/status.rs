//! Sprint lifecycle status and the operations guarded by it.

use super::ParseSprintStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    /// Sprint is being planned and has not started.
    Planning,
    /// Sprint is running.
    Active,
    /// Sprint finished and its velocity is frozen.
    Completed,
    /// Sprint was abandoned before completion.
    Cancelled,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// There is no path out of [`Self::Completed`] or [`Self::Cancelled`].
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planning, Self::Active | Self::Cancelled)
                | (Self::Active, Self::Completed | Self::Cancelled)
        )
    }

    /// Returns whether the status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns whether a sprint in this status occupies its date range for
    /// overlap detection.
    #[must_use]
    pub const fn occupies_schedule(self) -> bool {
        matches!(self, Self::Planning | Self::Active)
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

/// Operation attempted against a sprint, reported in transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintOperation {
    /// Move from planning to active.
    Start,
    /// Move from active to completed.
    Complete,
    /// Move to cancelled.
    Cancel,
    /// Attach a task assignment.
    AttachTask,
    /// Detach a task assignment.
    DetachTask,
    /// Mark an assigned task as complete.
    CompleteTask,
    /// Add, edit or complete a goal.
    EditGoals,
    /// Change name, description, dates, project or team capacity.
    Update,
    /// Append a burndown reading.
    RecordBurndown,
}

impl SprintOperation {
    /// Returns a short verb phrase for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::AttachTask => "attach a task to",
            Self::DetachTask => "detach a task from",
            Self::CompleteTask => "complete a task in",
            Self::EditGoals => "edit goals of",
            Self::Update => "update",
            Self::RecordBurndown => "record burndown for",
        }
    }
}

impl fmt::Display for SprintOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
