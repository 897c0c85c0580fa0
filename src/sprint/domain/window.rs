//! Sprint date range.

use super::SprintDomainError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: u64 = 86_400_000;

/// Validated sprint date range where `end` falls strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SprintWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SprintWindow {
    /// Creates a validated date range.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidDateRange`] when `end` is not after
    /// `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SprintDomainError> {
        if end <= start {
            return Err(SprintDomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the start of the range.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end of the range.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns whether two ranges share at least one instant. Both bounds are
    /// inclusive.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Returns the length of the range in whole days, rounded up.
    #[must_use]
    pub fn duration_days(&self) -> u64 {
        ceil_days(self.end - self.start)
    }

    /// Returns the days left until `end`, rounded up, or zero once `now` has
    /// passed it.
    #[must_use]
    pub fn days_until_end(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.end - now;
        if remaining <= TimeDelta::zero() {
            return 0;
        }
        ceil_days(remaining)
    }
}

fn ceil_days(span: TimeDelta) -> u64 {
    span.num_milliseconds()
        .unsigned_abs()
        .div_ceil(MILLIS_PER_DAY)
}
