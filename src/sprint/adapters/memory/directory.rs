//! In-memory project, task and permission collaborators.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::sprint::{
    domain::{ProjectId, TaskId, UserId},
    ports::{
        CollaboratorError, CollaboratorResult, PermissionPolicy, ProjectDirectory, TaskDirectory,
    },
};

fn lock_error(err: impl std::fmt::Display) -> CollaboratorError {
    CollaboratorError::unavailable(std::io::Error::other(err.to_string()))
}

/// Project store keyed by project, recording each project's manager.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectDirectory {
    projects: Arc<RwLock<HashMap<ProjectId, Option<UserId>>>>,
}

impl InMemoryProjectDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project and its manager.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Unavailable`] if the lock is poisoned.
    pub fn register(&self, project: ProjectId, manager: Option<UserId>) -> CollaboratorResult<()> {
        self.projects
            .write()
            .map_err(lock_error)?
            .insert(project, manager);
        Ok(())
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryProjectDirectory {
    async fn exists(&self, project: ProjectId) -> CollaboratorResult<bool> {
        let projects = self.projects.read().map_err(lock_error)?;
        Ok(projects.contains_key(&project))
    }

    async fn manager(&self, project: ProjectId) -> CollaboratorResult<Option<UserId>> {
        let projects = self.projects.read().map_err(lock_error)?;
        Ok(projects.get(&project).copied().flatten())
    }
}

/// Task store recording which project each task belongs to.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskDirectory {
    tasks: Arc<RwLock<HashMap<TaskId, ProjectId>>>,
}

impl InMemoryTaskDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a task under its project.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Unavailable`] if the lock is poisoned.
    pub fn register(&self, task: TaskId, project: ProjectId) -> CollaboratorResult<()> {
        self.tasks.write().map_err(lock_error)?.insert(task, project);
        Ok(())
    }
}

#[async_trait]
impl TaskDirectory for InMemoryTaskDirectory {
    async fn exists(&self, task: TaskId) -> CollaboratorResult<bool> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        Ok(tasks.contains_key(&task))
    }

    async fn project_of(&self, task: TaskId) -> CollaboratorResult<Option<ProjectId>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        Ok(tasks.get(&task).copied())
    }
}

/// Permission policy granting access to administrators and to the manager
/// recorded in a [`ProjectDirectory`].
#[derive(Debug, Clone)]
pub struct InMemoryPermissionPolicy<P> {
    projects: Arc<P>,
    admins: Arc<RwLock<HashSet<UserId>>>,
}

impl<P> InMemoryPermissionPolicy<P>
where
    P: ProjectDirectory,
{
    /// Creates a policy that resolves managers through `projects`.
    #[must_use]
    pub fn new(projects: Arc<P>) -> Self {
        Self {
            projects,
            admins: Arc::default(),
        }
    }

    /// Grants administrator rights to `user`.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Unavailable`] if the lock is poisoned.
    pub fn grant_admin(&self, user: UserId) -> CollaboratorResult<()> {
        self.admins.write().map_err(lock_error)?.insert(user);
        Ok(())
    }
}

#[async_trait]
impl<P> PermissionPolicy for InMemoryPermissionPolicy<P>
where
    P: ProjectDirectory,
{
    async fn is_manager_or_admin(
        &self,
        user: UserId,
        project: ProjectId,
    ) -> CollaboratorResult<bool> {
        let is_admin = self.admins.read().map_err(lock_error)?.contains(&user);
        if is_admin {
            return Ok(true);
        }
        Ok(self.projects.manager(project).await? == Some(user))
    }
}
