//! Sprintwise: sprint lifecycle and capacity tracking.
//!
//! This crate models time-boxed sprints for project teams. It tracks each
//! sprint through planning, execution and closure, keeps story-point totals
//! consistent as tasks come and go, prevents overlapping sprints within a
//! project, and derives completion, velocity and burndown metrics.
//!
//! # Architecture
//!
//! Sprintwise follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and collaborators
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//! - **Services**: Orchestration of domain rules across aggregates
//!
//! # Modules
//!
//! - [`sprint`]: Sprint aggregate, planning services and projections

pub mod sprint;
