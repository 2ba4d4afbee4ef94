//! Tuning knobs for [`BranchAndBoundPlanner`](crate::BranchAndBoundPlanner).

use std::time::Duration;

/// Default half-width of a meal window.
pub const DEFAULT_MEAL_TOLERANCE: Duration = Duration::from_secs(90 * 60);

/// How strictly meal times are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MealPolicy {
    /// Every meal time must be covered by a food stop inside its window.
    /// Orderings that miss a meal are discarded.
    #[default]
    Required,
    /// Orderings missing fewer meals win; completion time breaks ties.
    Preferred,
}

/// Limits on how much work a single search may do.
///
/// When a limit is hit the search stops and reports its best ordering so
/// far as non-exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchBudget {
    /// Maximum number of search edges to evaluate.
    pub max_edges: Option<u64>,
    /// Maximum wall-clock time to search for.
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    /// A budget with no limits.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_edges: None,
            time_limit: None,
        }
    }

    /// Limit the number of evaluated edges.
    #[must_use]
    pub const fn with_max_edges(mut self, max_edges: u64) -> Self {
        self.max_edges = Some(max_edges);
        self
    }

    /// Limit the wall-clock search time.
    #[must_use]
    pub const fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Configuration for [`BranchAndBoundPlanner`](crate::BranchAndBoundPlanner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Half-width of each meal window. A food visit overlapping the window,
    /// bounds inclusive, covers the meal.
    pub meal_tolerance: Duration,
    /// Whether missed meals disqualify an ordering.
    pub meal_policy: MealPolicy,
    /// Search limits.
    pub budget: SearchBudget,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            meal_tolerance: DEFAULT_MEAL_TOLERANCE,
            meal_policy: MealPolicy::default(),
            budget: SearchBudget::unlimited(),
        }
    }
}
