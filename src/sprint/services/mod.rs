//! Application services for sprint planning and read projections.

mod config;
mod planning;
mod queries;

pub use config::PlanningConfig;
pub use planning::{
    AttachTaskRequest, CreateSprintRequest, SprintPlanningError, SprintPlanningResult,
    SprintPlanningService, UpdateSprintRequest,
};
pub use queries::{SprintQueryError, SprintQueryResult, SprintQueryService, SprintView};
