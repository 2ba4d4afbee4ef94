//! The planning entry point.

use crate::{PlanError, PlanRequest, PlanResult};

/// Find a feasible, timed itinerary for a day.
///
/// Implementations must return [`PlanError::InvalidInput`] for malformed
/// requests rather than panicking, and must never return a schedule that
/// arrives at the end point after the finish-by time.
/// Planners must be `Send + Sync` so independent requests can run in
/// parallel.
pub trait Planner: Send + Sync {
    /// Plan `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] when the request is invalid, a cost lookup
    /// fails, or no feasible ordering exists.
    fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError>;
}
