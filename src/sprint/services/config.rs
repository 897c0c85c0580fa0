//! Limits applied by the planning service.

/// Configuration for sprint planning limits.
///
/// # Examples
///
/// ```
/// use sprintwise::sprint::services::PlanningConfig;
///
/// let config = PlanningConfig::default();
/// assert_eq!(config.max_goals, 20);
///
/// let strict = PlanningConfig::strict();
/// assert!(strict.max_task_assignments < config.max_task_assignments);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanningConfig {
    /// Maximum number of goals per sprint.
    pub max_goals: usize,
    /// Maximum number of task assignments per sprint.
    pub max_task_assignments: usize,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            max_goals: 20,
            max_task_assignments: 200,
        }
    }
}

impl PlanningConfig {
    /// Creates a lenient configuration with effectively unbounded limits.
    ///
    /// Useful for imports of historical sprints.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            max_goals: usize::MAX,
            max_task_assignments: usize::MAX,
        }
    }

    /// Creates a strict configuration with reduced limits.
    ///
    /// Useful for small teams that want to keep sprints focused.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_goals: 5,
            max_task_assignments: 40,
        }
    }
}
