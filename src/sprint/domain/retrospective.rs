//! Retrospective captured when a sprint completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form retrospective notes supplied when completing a sprint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrospectiveNotes {
    what_went_well: Vec<String>,
    what_went_wrong: Vec<String>,
    improvements: Vec<String>,
}

impl RetrospectiveNotes {
    /// Creates empty notes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            what_went_well: Vec::new(),
            what_went_wrong: Vec::new(),
            improvements: Vec::new(),
        }
    }

    /// Sets the things that went well.
    #[must_use]
    pub fn with_what_went_well(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.what_went_well = items.into_iter().collect();
        self
    }

    /// Sets the things that went wrong.
    #[must_use]
    pub fn with_what_went_wrong(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.what_went_wrong = items.into_iter().collect();
        self
    }

    /// Sets the agreed improvements.
    #[must_use]
    pub fn with_improvements(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.improvements = items.into_iter().collect();
        self
    }
}

/// Retrospective recorded on a completed sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrospective {
    /// Things that went well.
    pub what_went_well: Vec<String>,
    /// Things that went wrong.
    pub what_went_wrong: Vec<String>,
    /// Agreed improvements.
    pub improvements: Vec<String>,
    /// When the sprint was completed.
    pub completed_at: DateTime<Utc>,
}

impl Retrospective {
    /// Records notes against the completion time.
    #[must_use]
    pub fn from_notes(notes: RetrospectiveNotes, completed_at: DateTime<Utc>) -> Self {
        let RetrospectiveNotes {
            what_went_well,
            what_went_wrong,
            improvements,
        } = notes;
        Self {
            what_went_well,
            what_went_wrong,
            improvements,
            completed_at,
        }
    }
}
