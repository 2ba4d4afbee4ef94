//! Planning requests and the validator that produces them.
//!
//! A [`DayPlan`] is the loosely-typed shape supplied by whoever stores the
//! user's itinerary. Converting it into a [`PlanRequest`] rejects malformed
//! input with an [`InvalidInputError`] and removes duplicate stops, so the
//! planner only ever sees well-formed requests.

mod error;
mod input;

use std::collections::HashSet;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};

use crate::Point;

pub use error::InvalidInputError;
pub use input::{DayPlan, MAX_DWELL_MINUTES, PlaceInput, Schedule};

/// A single day to plan.
///
/// The start and end points are fixed; every distinct stop must be visited
/// exactly once in between. Start and end points are treated as having no
/// dwell regardless of the value they carry.
///
/// # Examples
/// ```rust
/// use chrono::{NaiveDate, NaiveTime};
/// use geo::Coord;
/// use daytrip_core::{Category, PlanRequest, Point};
///
/// let hotel = Point::new("Hotel", Coord { x: 0.0, y: 0.0 }, Category::Lodging, 0);
/// let request = PlanRequest {
///     date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
///     finish_by: NaiveTime::from_hms_opt(20, 0, 0).expect("valid time"),
///     meal_times: Vec::new(),
///     start: hotel.clone(),
///     end: hotel,
///     stops: Vec::new(),
/// };
/// assert!(request.validate().is_ok());
/// assert_eq!(request.horizon().as_secs(), 11 * 3600);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// Calendar day being planned.
    pub date: NaiveDate,
    /// Departure time from the start point.
    pub start_time: NaiveTime,
    /// Latest acceptable arrival at the end point.
    pub finish_by: NaiveTime,
    /// Target meal times, in the order supplied.
    pub meal_times: Vec<NaiveTime>,
    /// Fixed first point.
    pub start: Point,
    /// Fixed last point.
    pub end: Point,
    /// Points to visit in between.
    pub stops: Vec<Point>,
}

impl PlanRequest {
    /// Check the request's time constraints.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::FinishNotAfterStart`] when `finish_by` is
    /// not strictly after `start_time`.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.finish_by <= self.start_time {
            return Err(InvalidInputError::FinishNotAfterStart {
                start_time: self.start_time,
                finish_by: self.finish_by,
            });
        }
        Ok(())
    }

    /// Time available between leaving the start and the finish-by deadline.
    ///
    /// Returns [`Duration::ZERO`] for requests that fail [`Self::validate`].
    #[must_use]
    pub fn horizon(&self) -> Duration {
        (self.finish_by - self.start_time)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// The stops the planner must visit, in input order.
    ///
    /// Later duplicates of an earlier stop are dropped, as are stops equal to
    /// the start or end point.
    #[must_use]
    pub fn distinct_stops(&self) -> Vec<&Point> {
        let mut seen: HashSet<&Point> = HashSet::from([&self.start, &self.end]);
        self.stops
            .iter()
            .filter(|stop| seen.insert(*stop))
            .collect()
    }
}
