//! Velocity, completion and burndown derivation.

use super::{Sprint, SprintStatus};
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single remaining-work reading in the burndown series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BurndownPoint {
    date: NaiveDate,
    remaining_points: u32,
}

impl BurndownPoint {
    /// Creates a reading.
    #[must_use]
    pub const fn new(date: NaiveDate, remaining_points: u32) -> Self {
        Self {
            date,
            remaining_points,
        }
    }

    /// Returns the calendar day of the reading.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the committed points still outstanding on that day.
    #[must_use]
    pub const fn remaining_points(&self) -> u32 {
        self.remaining_points
    }
}

/// Metrics persisted with a sprint.
///
/// `velocity` tracks completed story points while the sprint is open and is
/// frozen once it completes. `burndown` is append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SprintMetrics {
    velocity: u32,
    burndown: Vec<BurndownPoint>,
}

impl SprintMetrics {
    /// Reconstructs metrics from persisted values.
    #[must_use]
    pub const fn from_parts(velocity: u32, burndown: Vec<BurndownPoint>) -> Self {
        Self { velocity, burndown }
    }

    /// Returns the velocity in story points.
    #[must_use]
    pub const fn velocity(&self) -> u32 {
        self.velocity
    }

    /// Returns the burndown series in recording order.
    #[must_use]
    pub fn burndown(&self) -> &[BurndownPoint] {
        &self.burndown
    }

    pub(crate) const fn set_velocity(&mut self, velocity: u32) {
        self.velocity = velocity;
    }

    /// Appends a reading unless one already exists for `date` or a later day.
    pub(crate) fn append(&mut self, point: BurndownPoint) -> bool {
        if self
            .burndown
            .last()
            .is_some_and(|last| last.date() >= point.date())
        {
            return false;
        }
        self.burndown.push(point);
        true
    }
}

/// Read-side metrics derived from a sprint at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintMetricsReport {
    /// Completed share of committed points, rounded to a whole percent.
    pub completion_percentage: u32,
    /// Story points delivered.
    pub velocity: u32,
    /// Committed points not yet delivered.
    pub remaining_points: u32,
    /// Committed share of team capacity, rounded to a whole percent.
    pub capacity_utilisation: u32,
    /// Sprint length in whole days, rounded up.
    pub duration_days: u64,
    /// Days left in an active sprint, rounded up; zero otherwise.
    pub days_remaining: u64,
    /// Recorded burndown series.
    pub burndown: Vec<BurndownPoint>,
}

impl SprintMetricsReport {
    /// Derives the report for `sprint` at the clock's current time.
    #[must_use]
    pub fn compute(sprint: &Sprint, clock: &impl Clock) -> Self {
        let capacity = sprint.capacity();
        let days_remaining = if sprint.status() == SprintStatus::Active {
            sprint.window().days_until_end(clock.utc())
        } else {
            0
        };

        Self {
            completion_percentage: completion_percentage(
                capacity.completed_story_points(),
                capacity.total_story_points(),
            ),
            velocity: sprint.metrics().velocity(),
            remaining_points: capacity.remaining_story_points(),
            capacity_utilisation: rounded_percentage(
                capacity.total_story_points(),
                capacity.team_capacity(),
            ),
            duration_days: sprint.window().duration_days(),
            days_remaining,
            burndown: sprint.metrics().burndown().to_vec(),
        }
    }
}

/// Returns `completed / total` as a whole percentage rounded half up, or zero
/// when nothing is committed.
#[must_use]
pub fn completion_percentage(completed: u32, total: u32) -> u32 {
    rounded_percentage(completed, total)
}

fn rounded_percentage(part: u32, whole: u32) -> u32 {
    // round(part / whole * 100) == floor((200 * part + whole) / (2 * whole))
    let numerator = u64::from(part)
        .saturating_mul(200)
        .saturating_add(u64::from(whole));
    let denominator = u64::from(whole).saturating_mul(2);
    numerator
        .checked_div(denominator)
        .map_or(0, |percent| u32::try_from(percent).unwrap_or(u32::MAX))
}
