//! Domain model for sprint lifecycle and capacity tracking.
//!
//! The sprint domain models status transitions, task capacity bookkeeping,
//! overlap detection and metric derivation while keeping every
//! infrastructure concern outside the domain boundary. Projects, tasks and
//! users are referenced by identifier only; the sprint never owns them.

mod assignment;
mod capacity;
mod error;
mod goal;
mod ids;
mod metrics;
mod retrospective;
mod schedule;
mod sprint;
mod status;
mod text;
mod window;

pub use assignment::{TaskAssignment, TaskPriority};
pub use capacity::SprintCapacity;
pub use error::{ParseSprintStatusError, ParseTaskPriorityError, SprintDomainError};
pub use goal::SprintGoal;
pub use ids::{ProjectId, SprintId, TaskId, UserId};
pub use metrics::{BurndownPoint, SprintMetrics, SprintMetricsReport, completion_percentage};
pub use retrospective::{Retrospective, RetrospectiveNotes};
pub use schedule::{ensure_schedulable, find_conflict, is_schedulable};
pub use sprint::{NewSprint, PersistedSprintData, Sprint};
pub use status::{SprintOperation, SprintStatus};
pub use text::{GoalDescription, SprintDescription, SprintName};
pub use window::SprintWindow;
