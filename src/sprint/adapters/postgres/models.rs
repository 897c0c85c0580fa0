//! Diesel row models for sprint persistence.

use super::schema::sprints;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for sprint records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SprintRow {
    /// Sprint identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Sprint name.
    pub name: String,
    /// Sprint description.
    pub description: String,
    /// Start of the planned range.
    pub start_date: DateTime<Utc>,
    /// End of the planned range.
    pub end_date: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Ordered goals JSON array.
    pub goals: Value,
    /// Task assignments JSON array.
    pub task_assignments: Value,
    /// Capacity JSON object.
    pub capacity: Value,
    /// Metrics JSON object.
    pub metrics: Value,
    /// Retrospective JSON object.
    pub retrospective: Option<Value>,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Creator.
    pub created_by: uuid::Uuid,
    /// Last editor.
    pub updated_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version.
    pub version: i64,
}

/// Insert and update model for sprint records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = sprints)]
#[diesel(treat_none_as_null = true)]
pub struct SprintRecord {
    /// Sprint identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Sprint name.
    pub name: String,
    /// Sprint description.
    pub description: String,
    /// Start of the planned range.
    pub start_date: DateTime<Utc>,
    /// End of the planned range.
    pub end_date: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Ordered goals JSON array.
    pub goals: Value,
    /// Task assignments JSON array.
    pub task_assignments: Value,
    /// Capacity JSON object.
    pub capacity: Value,
    /// Metrics JSON object.
    pub metrics: Value,
    /// Retrospective JSON object.
    pub retrospective: Option<Value>,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Creator.
    pub created_by: uuid::Uuid,
    /// Last editor.
    pub updated_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Version written by this save.
    pub version: i64,
}
