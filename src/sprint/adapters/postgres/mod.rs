//! `PostgreSQL` adapters for sprint persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresSprintRepository, SprintPgPool};
