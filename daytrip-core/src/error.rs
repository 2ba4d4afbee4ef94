use thiserror::Error;

use crate::{CostLookupError, InvalidInputError};

/// Errors returned by [`Planner::plan`](crate::Planner::plan).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request was malformed; nothing was searched.
    #[error("invalid planning request: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// The cost source failed on a leg; the planning call was abandoned.
    #[error(transparent)]
    CostLookup(#[from] CostLookupError),
    /// A complete search proved that no ordering meets the deadline and meal
    /// constraints.
    #[error("no visiting order meets the deadline and meal constraints")]
    InfeasibleSchedule,
    /// The search budget ran out before any feasible ordering was found.
    /// One may still exist.
    #[error("no feasible visiting order found before the search budget ran out")]
    InfeasibleScheduleProvisional,
}

impl PlanError {
    /// Whether the error reports an infeasible schedule rather than a fault.
    #[must_use]
    pub const fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::InfeasibleSchedule | Self::InfeasibleScheduleProvisional
        )
    }
}
