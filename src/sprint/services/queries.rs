//! Read-side projections over stored sprints.

use crate::sprint::{
    domain::{ProjectId, Sprint, SprintMetricsReport},
    ports::{SprintRepository, SprintRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// A sprint paired with metrics derived at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SprintView {
    /// The stored sprint.
    pub sprint: Sprint,
    /// Metrics computed from the sprint at the query instant.
    pub metrics: SprintMetricsReport,
}

/// Errors returned by [`SprintQueryService`].
#[derive(Debug, Error)]
pub enum SprintQueryError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SprintRepositoryError),
}

/// Result type for sprint query operations.
pub type SprintQueryResult<T> = Result<T, SprintQueryError>;

/// Answers listing queries. Deleted sprints never appear in results.
#[derive(Clone)]
pub struct SprintQueryService<R, C>
where
    R: SprintRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> SprintQueryService<R, C>
where
    R: SprintRepository,
    C: Clock + Send + Sync,
{
    /// Creates a query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Lists sprints currently in progress across all projects.
    ///
    /// # Errors
    ///
    /// Returns [`SprintQueryError::Repository`] when the lookup fails.
    pub async fn find_active(&self) -> SprintQueryResult<Vec<Sprint>> {
        let sprints = self.repository.find_active().await?;
        debug!(count = sprints.len(), "active sprints loaded");
        Ok(sprints)
    }

    /// Lists a project's sprints, most recent start first.
    ///
    /// # Errors
    ///
    /// Returns [`SprintQueryError::Repository`] when the lookup fails.
    pub async fn find_by_project(&self, project: ProjectId) -> SprintQueryResult<Vec<Sprint>> {
        let mut sprints: Vec<Sprint> = self
            .repository
            .find_by_project(project)
            .await?
            .into_iter()
            .filter(Sprint::is_active)
            .collect();
        sprints.sort_by_key(|sprint| std::cmp::Reverse(sprint.window().start()));
        debug!(%project, count = sprints.len(), "project sprints loaded");
        Ok(sprints)
    }

    /// Lists active sprints with their metrics.
    ///
    /// # Errors
    ///
    /// Returns [`SprintQueryError::Repository`] when the lookup fails.
    pub async fn active_views(&self) -> SprintQueryResult<Vec<SprintView>> {
        let sprints = self.find_active().await?;
        Ok(self.to_views(sprints))
    }

    /// Lists a project's sprints with their metrics, most recent start first.
    ///
    /// # Errors
    ///
    /// Returns [`SprintQueryError::Repository`] when the lookup fails.
    pub async fn project_views(&self, project: ProjectId) -> SprintQueryResult<Vec<SprintView>> {
        let sprints = self.find_by_project(project).await?;
        Ok(self.to_views(sprints))
    }

    fn to_views(&self, sprints: Vec<Sprint>) -> Vec<SprintView> {
        sprints
            .into_iter()
            .map(|sprint| {
                let metrics = SprintMetricsReport::compute(&sprint, &*self.clock);
                SprintView { sprint, metrics }
            })
            .collect()
    }
}
