//! Shared fixtures for sprint unit tests.

use crate::sprint::domain::{
    NewSprint, ProjectId, RetrospectiveNotes, Sprint, SprintDescription, SprintName,
    SprintStatus, SprintWindow, UserId,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

/// Clock pinned to an instant that tests move explicitly.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock should not be poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock should not be poisoned")
    }
}

/// Midnight UTC on the given day.
pub fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid calendar date")
}

/// Window between two days of January 2024.
pub fn january(start_day: u32, end_day: u32) -> SprintWindow {
    SprintWindow::new(utc_date(2024, 1, start_day), utc_date(2024, 1, end_day))
        .expect("valid sprint window")
}

/// Clock fixed on 5 January 2024, inside the default test window.
pub fn clock() -> FixedClock {
    FixedClock::at(utc_date(2024, 1, 5))
}

pub fn planned_sprint(project: ProjectId, window: SprintWindow, clock: &FixedClock) -> Sprint {
    Sprint::new(
        NewSprint {
            project,
            name: SprintName::new("Sprint 1").expect("valid name"),
            description: SprintDescription::default(),
            window,
            team_capacity: 20,
            created_by: UserId::new(),
        },
        clock,
    )
}

/// Builds a sprint and drives it into `status`.
pub fn sprint_in(status: SprintStatus, clock: &FixedClock) -> Sprint {
    let mut sprint = planned_sprint(ProjectId::new(), january(1, 14), clock);
    let actor = UserId::new();
    match status {
        SprintStatus::Planning => {}
        SprintStatus::Active => sprint.start(actor, clock).expect("start"),
        SprintStatus::Completed => {
            sprint.start(actor, clock).expect("start");
            sprint
                .complete(RetrospectiveNotes::new(), actor, clock)
                .expect("complete");
        }
        SprintStatus::Cancelled => sprint.cancel(actor, clock).expect("cancel"),
    }
    sprint
}
