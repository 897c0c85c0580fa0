//! Sprint lifecycle and capacity tracking.
//!
//! A sprint is a time-boxed unit of planned work for a project. This module
//! owns its status state machine, the story-point bookkeeping performed as
//! tasks are attached, detached and completed, the scheduling rule that keeps
//! sprints of one project from overlapping, and the derived metrics
//! (completion percentage, velocity, burndown). The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
