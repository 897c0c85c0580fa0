//! Diesel schema for sprint persistence.

diesel::table! {
    /// Sprint aggregates with owned goals, assignments and metrics as JSON.
    sprints (id) {
        /// Sprint identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Sprint name.
        #[max_length = 100]
        name -> Varchar,
        /// Sprint description.
        #[max_length = 500]
        description -> Varchar,
        /// Start of the planned range.
        start_date -> Timestamptz,
        /// End of the planned range.
        end_date -> Timestamptz,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Ordered goals.
        goals -> Jsonb,
        /// Task assignments.
        task_assignments -> Jsonb,
        /// Capacity record.
        capacity -> Jsonb,
        /// Velocity and burndown series.
        metrics -> Jsonb,
        /// Retrospective recorded at completion.
        retrospective -> Nullable<Jsonb>,
        /// Soft-delete flag.
        is_active -> Bool,
        /// Creator.
        created_by -> Uuid,
        /// Last editor.
        updated_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last change timestamp.
        updated_at -> Timestamptz,
        /// Optimistic-concurrency version.
        version -> Int8,
    }
}
