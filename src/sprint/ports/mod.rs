//! Port contracts for sprint lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by sprint services:
//! persistence of the aggregate itself, and lookups into the project, task
//! and permission stores that the sprint context does not own.

pub mod collaborators;
pub mod repository;

pub use collaborators::{
    CollaboratorError, CollaboratorResult, PermissionPolicy, ProjectDirectory, TaskDirectory,
};
pub use repository::{SprintRepository, SprintRepositoryError, SprintRepositoryResult};
