//! Sprint goals.

use super::GoalDescription;
use serde::{Deserialize, Serialize};

/// A stated objective for the sprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SprintGoal {
    description: GoalDescription,
    completed: bool,
}

impl SprintGoal {
    /// Creates an open goal.
    #[must_use]
    pub const fn new(description: GoalDescription) -> Self {
        Self {
            description,
            completed: false,
        }
    }

    /// Returns the goal description.
    #[must_use]
    pub const fn description(&self) -> &GoalDescription {
        &self.description
    }

    /// Returns whether the goal has been met.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_description(&mut self, description: GoalDescription) {
        self.description = description;
    }

    pub(crate) const fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
