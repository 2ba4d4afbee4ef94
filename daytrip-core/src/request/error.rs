use chrono::NaiveTime;
use thiserror::Error;

/// Reasons a day plan cannot become a [`PlanRequest`](super::PlanRequest).
///
/// Every variant is detected before any search starts and is fixed by
/// correcting the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// No start point was supplied.
    #[error("a start point is required")]
    MissingStart,
    /// No end point was supplied.
    #[error("an end point is required")]
    MissingEnd,
    /// No start time was supplied.
    #[error("a start time is required")]
    MissingStartTime,
    /// No finish-by time was supplied.
    #[error("a finish-by time is required")]
    MissingFinishBy,
    /// The finish-by time is not strictly after the start time.
    #[error("finish-by time {finish_by} must be after start time {start_time}")]
    FinishNotAfterStart {
        /// Requested start time.
        start_time: NaiveTime,
        /// Requested finish-by time.
        finish_by: NaiveTime,
    },
    /// A point asked for a negative dwell.
    #[error("point {name:?} has negative dwell of {minutes} minutes")]
    NegativeDwell {
        /// Offending point.
        name: String,
        /// Requested dwell.
        minutes: i64,
    },
    /// A point asked to be held for longer than a day.
    #[error("point {name:?} dwell of {minutes} minutes exceeds a day")]
    DwellTooLong {
        /// Offending point.
        name: String,
        /// Requested dwell.
        minutes: i64,
    },
    /// A point lies outside the valid latitude/longitude ranges.
    #[error("point {name:?} has invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates {
        /// Offending point.
        name: String,
        /// Supplied latitude.
        lat: f64,
        /// Supplied longitude.
        lng: f64,
    },
}
