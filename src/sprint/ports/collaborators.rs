//! Ports onto the project, task and permission stores.
//!
//! The sprint context only holds identifiers for projects, tasks and users.
//! These contracts answer the cross-aggregate questions the planning service
//! needs before it lets a command reach the aggregate.

use crate::sprint::domain::{ProjectId, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for collaborator lookups.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Read access to the project store.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Returns whether the project exists.
    async fn exists(&self, project: ProjectId) -> CollaboratorResult<bool>;

    /// Returns the project's manager, or `None` when the project is unknown
    /// or has no manager.
    async fn manager(&self, project: ProjectId) -> CollaboratorResult<Option<UserId>>;
}

/// Read access to the task store.
#[async_trait]
pub trait TaskDirectory: Send + Sync {
    /// Returns whether the task exists.
    async fn exists(&self, task: TaskId) -> CollaboratorResult<bool>;

    /// Returns the project the task belongs to, or `None` when the task is
    /// unknown.
    async fn project_of(&self, task: TaskId) -> CollaboratorResult<Option<ProjectId>>;
}

/// Authorization decisions for sprint commands.
#[async_trait]
pub trait PermissionPolicy: Send + Sync {
    /// Returns whether `user` manages `project` or is an administrator.
    async fn is_manager_or_admin(
        &self,
        user: UserId,
        project: ProjectId,
    ) -> CollaboratorResult<bool>;
}

/// Errors returned by collaborator adapters.
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    /// The backing store could not answer.
    #[error("collaborator unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl CollaboratorError {
    /// Wraps a backing-store failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
