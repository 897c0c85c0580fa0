//! Committed, delivered and available story points.

use serde::{Deserialize, Serialize};

/// Story point capacity of a sprint.
///
/// `total_story_points` always equals the sum of the assigned tasks' points
/// and `completed_story_points` the sum over completed assignments, so the
/// latter never exceeds the former. Both are maintained exclusively by the
/// owning [`super::Sprint`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SprintCapacity {
    total_story_points: u32,
    completed_story_points: u32,
    team_capacity: u32,
}

impl SprintCapacity {
    /// Creates an empty capacity record for a team able to deliver
    /// `team_capacity` points.
    #[must_use]
    pub const fn with_team_capacity(team_capacity: u32) -> Self {
        Self {
            total_story_points: 0,
            completed_story_points: 0,
            team_capacity,
        }
    }

    /// Returns the committed story points.
    #[must_use]
    pub const fn total_story_points(&self) -> u32 {
        self.total_story_points
    }

    /// Returns the delivered story points.
    #[must_use]
    pub const fn completed_story_points(&self) -> u32 {
        self.completed_story_points
    }

    /// Returns the team's available effort.
    #[must_use]
    pub const fn team_capacity(&self) -> u32 {
        self.team_capacity
    }

    /// Returns the committed points not yet delivered.
    #[must_use]
    pub const fn remaining_story_points(&self) -> u32 {
        self.total_story_points
            .saturating_sub(self.completed_story_points)
    }

    /// Adds `points` to the committed total, returning `false` and leaving
    /// the record untouched when the total would overflow.
    pub(crate) const fn commit(&mut self, points: u32) -> bool {
        let Some(total) = self.total_story_points.checked_add(points) else {
            return false;
        };
        self.total_story_points = total;
        true
    }

    pub(crate) const fn retract(&mut self, points: u32, was_completed: bool) {
        self.total_story_points = self.total_story_points.saturating_sub(points);
        if was_completed {
            self.completed_story_points = self.completed_story_points.saturating_sub(points);
        }
    }

    pub(crate) const fn deliver(&mut self, points: u32) {
        self.completed_story_points = self.completed_story_points.saturating_add(points);
    }

    pub(crate) const fn set_team_capacity(&mut self, team_capacity: u32) {
        self.team_capacity = team_capacity;
    }
}
