//! Validated text fields carried by a sprint.
//!
//! Deserialization runs the same checks as the constructors, so stored
//! values cannot bypass them.

use super::SprintDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a sprint name in characters.
const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a sprint description in characters.
const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum length of a goal description in characters.
const MAX_GOAL_LENGTH: usize = 200;

/// Trimmed sprint name of 1 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SprintName(String);

impl SprintName {
    /// Creates a validated sprint name.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptySprintName`] when the value is empty
    /// after trimming, or [`SprintDomainError::SprintNameTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, SprintDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SprintDomainError::EmptySprintName);
        }

        let length = normalized.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(SprintDomainError::SprintNameTooLong {
                length,
                max: MAX_NAME_LENGTH,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SprintName {
    type Error = SprintDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SprintName> for String {
    fn from(value: SprintName) -> Self {
        value.0
    }
}

impl AsRef<str> for SprintName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SprintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed sprint description of at most 500 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SprintDescription(String);

impl SprintDescription {
    /// Creates a validated sprint description. Empty descriptions are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::SprintDescriptionTooLong`] when the value
    /// exceeds 500 characters after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SprintDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let length = normalized.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(SprintDomainError::SprintDescriptionTooLong {
                length,
                max: MAX_DESCRIPTION_LENGTH,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the description is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for SprintDescription {
    type Error = SprintDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SprintDescription> for String {
    fn from(value: SprintDescription) -> Self {
        value.0
    }
}

impl AsRef<str> for SprintDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Trimmed goal description of 1 to 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GoalDescription(String);

impl GoalDescription {
    /// Creates a validated goal description.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptyGoalDescription`] when the value is
    /// empty after trimming, or [`SprintDomainError::GoalDescriptionTooLong`]
    /// when it exceeds 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, SprintDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SprintDomainError::EmptyGoalDescription);
        }

        let length = normalized.chars().count();
        if length > MAX_GOAL_LENGTH {
            return Err(SprintDomainError::GoalDescriptionTooLong {
                length,
                max: MAX_GOAL_LENGTH,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GoalDescription {
    type Error = SprintDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GoalDescription> for String {
    fn from(value: GoalDescription) -> Self {
        value.0
    }
}

impl AsRef<str> for GoalDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GoalDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
