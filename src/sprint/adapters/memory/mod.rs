//! In-memory adapters for tests and single-process deployments.

mod directory;
mod sprint;

pub use directory::{InMemoryPermissionPolicy, InMemoryProjectDirectory, InMemoryTaskDirectory};
pub use sprint::InMemorySprintRepository;
