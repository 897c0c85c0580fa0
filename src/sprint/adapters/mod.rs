//! Adapter implementations for sprint persistence and collaborator ports.

pub mod memory;
pub mod postgres;
