use thiserror::Error;

/// A [`CostSource`](super::CostSource) could not price a pair of points.
///
/// Both point names are carried so callers can tell which leg failed. The
/// planner aborts the whole planning call on the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cost lookup from {from:?} to {to:?} failed: {reason}")]
pub struct CostLookupError {
    /// Name of the departure point.
    pub from: String,
    /// Name of the arrival point.
    pub to: String,
    /// Provider-specific description of the failure.
    pub reason: String,
}

impl CostLookupError {
    /// Construct an error for the leg `from -> to`.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from [`StraightLineCostSource::new`](super::StraightLineCostSource::new).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StraightLineConfigError {
    /// Speed was zero, negative or not finite.
    #[error("average speed must be a positive, finite number of km/h, got {0}")]
    InvalidSpeed(f64),
    /// Expense rate was negative or not finite.
    #[error("expense per kilometre must be a non-negative, finite number, got {0}")]
    InvalidExpense(f64),
}
