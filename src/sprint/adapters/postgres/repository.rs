//! `PostgreSQL` repository implementation for sprint storage.

use super::{
    models::{SprintRecord, SprintRow},
    schema::sprints,
};
use crate::sprint::{
    domain::{
        PersistedSprintData, ProjectId, Sprint, SprintDescription, SprintId, SprintName,
        SprintStatus, SprintWindow, UserId,
    },
    ports::{SprintRepository, SprintRepositoryError, SprintRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by sprint adapters.
pub type SprintPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed sprint repository.
#[derive(Debug, Clone)]
pub struct PostgresSprintRepository {
    pool: SprintPgPool,
}

impl PostgresSprintRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SprintPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SprintRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SprintRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SprintRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SprintRepositoryError::persistence)?
    }
}

#[async_trait]
impl SprintRepository for PostgresSprintRepository {
    async fn save(&self, sprint: &Sprint) -> SprintRepositoryResult<Sprint> {
        let sprint_id = sprint.id();
        let expected = sprint.version();
        let next_version = expected.saturating_add(1);
        let record = to_record(sprint, next_version)?;
        let saved = sprint.clone().with_version(next_version);

        self.run_blocking(move |connection| {
            if expected == 0 {
                insert_sprint(connection, &record, sprint_id)?;
            } else {
                update_sprint(connection, &record, sprint_id, expected)?;
            }
            Ok(saved)
        })
        .await
    }

    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        self.run_blocking(move |connection| {
            let row = sprints::table
                .filter(sprints::id.eq(id.into_inner()))
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()
                .map_err(SprintRepositoryError::persistence)?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }

    async fn find_active(&self) -> SprintRepositoryResult<Vec<Sprint>> {
        self.run_blocking(move |connection| {
            let rows = sprints::table
                .filter(sprints::status.eq(SprintStatus::Active.as_str()))
                .filter(sprints::is_active.eq(true))
                .select(SprintRow::as_select())
                .load::<SprintRow>(connection)
                .map_err(SprintRepositoryError::persistence)?;
            rows.into_iter().map(row_to_sprint).collect()
        })
        .await
    }

    async fn find_by_project(&self, project: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        self.run_blocking(move |connection| {
            let rows = sprints::table
                .filter(sprints::project_id.eq(project.into_inner()))
                .order(sprints::start_date.desc())
                .select(SprintRow::as_select())
                .load::<SprintRow>(connection)
                .map_err(SprintRepositoryError::persistence)?;
            rows.into_iter().map(row_to_sprint).collect()
        })
        .await
    }
}

fn insert_sprint(
    connection: &mut PgConnection,
    record: &SprintRecord,
    sprint_id: SprintId,
) -> SprintRepositoryResult<()> {
    diesel::insert_into(sprints::table)
        .values(record)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                SprintRepositoryError::DuplicateSprint(sprint_id)
            }
            _ => SprintRepositoryError::persistence(err),
        })?;
    Ok(())
}

fn update_sprint(
    connection: &mut PgConnection,
    record: &SprintRecord,
    sprint_id: SprintId,
    expected: u64,
) -> SprintRepositoryResult<()> {
    let expected_column = to_column_version(expected)?;
    let updated = diesel::update(
        sprints::table
            .filter(sprints::id.eq(sprint_id.into_inner()))
            .filter(sprints::version.eq(expected_column)),
    )
    .set(record)
    .execute(connection)
    .map_err(SprintRepositoryError::persistence)?;

    if updated > 0 {
        return Ok(());
    }

    // Nothing matched: distinguish a missing row from a stale version.
    let stored = sprints::table
        .filter(sprints::id.eq(sprint_id.into_inner()))
        .select(sprints::version)
        .first::<i64>(connection)
        .optional()
        .map_err(SprintRepositoryError::persistence)?;

    match stored {
        None => Err(SprintRepositoryError::NotFound(sprint_id)),
        Some(found) => Err(SprintRepositoryError::VersionConflict {
            sprint_id,
            expected,
            found: from_column_version(found)?,
        }),
    }
}

fn to_column_version(version: u64) -> SprintRepositoryResult<i64> {
    i64::try_from(version).map_err(SprintRepositoryError::persistence)
}

fn from_column_version(version: i64) -> SprintRepositoryResult<u64> {
    u64::try_from(version).map_err(SprintRepositoryError::invalid_persisted_data)
}

fn to_record(sprint: &Sprint, version: u64) -> SprintRepositoryResult<SprintRecord> {
    let goals = serde_json::to_value(sprint.goals()).map_err(SprintRepositoryError::persistence)?;
    let task_assignments = serde_json::to_value(sprint.task_assignments())
        .map_err(SprintRepositoryError::persistence)?;
    let capacity =
        serde_json::to_value(sprint.capacity()).map_err(SprintRepositoryError::persistence)?;
    let metrics =
        serde_json::to_value(sprint.metrics()).map_err(SprintRepositoryError::persistence)?;
    let retrospective = sprint
        .retrospective()
        .map(serde_json::to_value)
        .transpose()
        .map_err(SprintRepositoryError::persistence)?;

    Ok(SprintRecord {
        id: sprint.id().into_inner(),
        project_id: sprint.project().into_inner(),
        name: sprint.name().as_str().to_owned(),
        description: sprint.description().as_str().to_owned(),
        start_date: sprint.window().start(),
        end_date: sprint.window().end(),
        status: sprint.status().as_str().to_owned(),
        goals,
        task_assignments,
        capacity,
        metrics,
        retrospective,
        is_active: sprint.is_active(),
        created_by: sprint.created_by().into_inner(),
        updated_by: sprint.updated_by().into_inner(),
        created_at: sprint.created_at(),
        updated_at: sprint.updated_at(),
        version: to_column_version(version)?,
    })
}

fn row_to_sprint(row: SprintRow) -> SprintRepositoryResult<Sprint> {
    let SprintRow {
        id,
        project_id,
        name: persisted_name,
        description: persisted_description,
        start_date,
        end_date,
        status: persisted_status,
        goals: persisted_goals,
        task_assignments: persisted_assignments,
        capacity: persisted_capacity,
        metrics: persisted_metrics,
        retrospective: persisted_retrospective,
        is_active,
        created_by,
        updated_by,
        created_at,
        updated_at,
        version: persisted_version,
    } = row;

    let data = PersistedSprintData {
        id: SprintId::from_uuid(id),
        project: ProjectId::from_uuid(project_id),
        name: SprintName::new(persisted_name)
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        description: SprintDescription::new(persisted_description)
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        window: SprintWindow::new(start_date, end_date)
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        status: SprintStatus::try_from(persisted_status.as_str())
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        goals: serde_json::from_value(persisted_goals)
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        task_assignments: serde_json::from_value(persisted_assignments)
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        capacity: serde_json::from_value(persisted_capacity)
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        metrics: serde_json::from_value(persisted_metrics)
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        retrospective: persisted_retrospective
            .map(serde_json::from_value)
            .transpose()
            .map_err(SprintRepositoryError::invalid_persisted_data)?,
        is_active,
        created_by: UserId::from_uuid(created_by),
        updated_by: UserId::from_uuid(updated_by),
        created_at,
        updated_at,
        version: from_column_version(persisted_version)?,
    };
    Ok(Sprint::from_persisted(data))
}
