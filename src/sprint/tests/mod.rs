//! Unit tests for the sprint module.

mod support;
