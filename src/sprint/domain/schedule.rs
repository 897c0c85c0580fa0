//! Overlap detection between sprints of one project.

use super::{ProjectId, Sprint, SprintDomainError, SprintId, SprintWindow};

/// Returns the first sprint in `existing` that blocks scheduling `window` for
/// `project`.
///
/// A sprint blocks the candidate when it belongs to the same project, has not
/// been soft-deleted, is planning or active, is not `exclude`, and its range
/// overlaps the candidate with inclusive bounds. Completed and cancelled
/// sprints never block.
#[must_use]
pub fn find_conflict<'a>(
    project: ProjectId,
    window: &SprintWindow,
    existing: &'a [Sprint],
    exclude: Option<SprintId>,
) -> Option<&'a Sprint> {
    existing.iter().find(|sprint| {
        sprint.project() == project
            && sprint.is_active()
            && sprint.status().occupies_schedule()
            && Some(sprint.id()) != exclude
            && sprint.window().overlaps(window)
    })
}

/// Returns whether `window` can be scheduled for `project`.
#[must_use]
pub fn is_schedulable(
    project: ProjectId,
    window: &SprintWindow,
    existing: &[Sprint],
    exclude: Option<SprintId>,
) -> bool {
    find_conflict(project, window, existing, exclude).is_none()
}

/// Validates that `window` can be scheduled for `project`.
///
/// # Errors
///
/// Returns [`SprintDomainError::SprintOverlap`] naming the first conflicting
/// sprint.
pub fn ensure_schedulable(
    project: ProjectId,
    window: &SprintWindow,
    existing: &[Sprint],
    exclude: Option<SprintId>,
) -> Result<(), SprintDomainError> {
    match find_conflict(project, window, existing, exclude) {
        Some(conflict) => Err(SprintDomainError::SprintOverlap {
            conflicting: conflict.id(),
            name: conflict.name().clone(),
        }),
        None => Ok(()),
    }
}
