//! In-memory repository for sprint aggregates.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sprint::{
    domain::{ProjectId, Sprint, SprintId, SprintStatus},
    ports::{SprintRepository, SprintRepositoryError, SprintRepositoryResult},
};

/// Thread-safe in-memory sprint repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySprintRepository {
    state: Arc<RwLock<InMemorySprintState>>,
}

#[derive(Debug, Default)]
struct InMemorySprintState {
    sprints: HashMap<SprintId, Sprint>,
    project_index: HashMap<ProjectId, Vec<SprintId>>,
}

impl InMemorySprintRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> SprintRepositoryError {
    SprintRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Removes a sprint ID from the project index, cleaning up the entry if empty.
fn remove_from_index(state: &mut InMemorySprintState, sprint_id: SprintId, project: ProjectId) {
    if let Some(ids) = state.project_index.get_mut(&project) {
        ids.retain(|id| *id != sprint_id);
        if ids.is_empty() {
            state.project_index.remove(&project);
        }
    }
}

fn insert(state: &mut InMemorySprintState, sprint: &Sprint) -> SprintRepositoryResult<Sprint> {
    if state.sprints.contains_key(&sprint.id()) {
        return Err(SprintRepositoryError::DuplicateSprint(sprint.id()));
    }

    let stored = sprint.clone().with_version(1);
    state
        .project_index
        .entry(stored.project())
        .or_default()
        .push(stored.id());
    state.sprints.insert(stored.id(), stored.clone());
    Ok(stored)
}

fn replace(state: &mut InMemorySprintState, sprint: &Sprint) -> SprintRepositoryResult<Sprint> {
    let (found, previous_project) = state
        .sprints
        .get(&sprint.id())
        .map(|existing| (existing.version(), existing.project()))
        .ok_or(SprintRepositoryError::NotFound(sprint.id()))?;

    if found != sprint.version() {
        return Err(SprintRepositoryError::VersionConflict {
            sprint_id: sprint.id(),
            expected: sprint.version(),
            found,
        });
    }

    if previous_project != sprint.project() {
        remove_from_index(state, sprint.id(), previous_project);
        state
            .project_index
            .entry(sprint.project())
            .or_default()
            .push(sprint.id());
    }

    let stored = sprint.clone().with_version(found.saturating_add(1));
    state.sprints.insert(stored.id(), stored.clone());
    Ok(stored)
}

#[async_trait]
impl SprintRepository for InMemorySprintRepository {
    async fn save(&self, sprint: &Sprint) -> SprintRepositoryResult<Sprint> {
        let mut state = self.state.write().map_err(lock_error)?;
        if sprint.version() == 0 {
            insert(&mut state, sprint)
        } else {
            replace(&mut state, sprint)
        }
    }

    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.sprints.get(&id).cloned())
    }

    async fn find_active(&self) -> SprintRepositoryResult<Vec<Sprint>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .sprints
            .values()
            .filter(|sprint| sprint.is_active() && sprint.status() == SprintStatus::Active)
            .cloned()
            .collect())
    }

    async fn find_by_project(&self, project: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .project_index
            .get(&project)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.sprints.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}
