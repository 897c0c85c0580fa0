//! Repository port for sprint persistence and lookup.

use crate::sprint::domain::{ProjectId, Sprint, SprintId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sprint repository operations.
pub type SprintRepositoryResult<T> = Result<T, SprintRepositoryError>;

/// Sprint persistence contract.
///
/// Writes are guarded by the aggregate's version: a sprint can only be saved
/// over the exact version it was loaded at.
#[async_trait]
pub trait SprintRepository: Send + Sync {
    /// Persists a sprint and returns it stamped with its new version.
    ///
    /// A sprint at version `0` is inserted; any other version replaces the
    /// stored record only if the stored version matches.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::DuplicateSprint`] when inserting an
    /// identifier that already exists, [`SprintRepositoryError::NotFound`]
    /// when updating a sprint that was never stored, or
    /// [`SprintRepositoryError::VersionConflict`] when the stored version has
    /// moved on since the sprint was loaded.
    async fn save(&self, sprint: &Sprint) -> SprintRepositoryResult<Sprint>;

    /// Finds a sprint by identifier, including soft-deleted sprints.
    ///
    /// Returns `None` when the sprint does not exist.
    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>>;

    /// Returns every sprint that is running and not soft-deleted.
    async fn find_active(&self) -> SprintRepositoryResult<Vec<Sprint>>;

    /// Returns every sprint recorded for a project, soft-deleted ones
    /// included.
    async fn find_by_project(&self, project: ProjectId) -> SprintRepositoryResult<Vec<Sprint>>;
}

/// Errors returned by sprint repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SprintRepositoryError {
    /// A sprint with the same identifier already exists.
    #[error("duplicate sprint identifier: {0}")]
    DuplicateSprint(SprintId),

    /// The sprint was not found.
    #[error("sprint not found: {0}")]
    NotFound(SprintId),

    /// The stored sprint changed after the caller loaded it.
    #[error("sprint {sprint_id} was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        /// Sprint identifier.
        sprint_id: SprintId,
        /// Version the caller loaded.
        expected: u64,
        /// Version currently stored.
        found: u64,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SprintRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
