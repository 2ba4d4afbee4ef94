//! Core domain types for the day-trip planning engine.
//!
//! The crate defines the vocabulary shared by planners and their callers:
//! [`Point`] values, the pluggable [`CostSource`], validated
//! [`PlanRequest`]s, search [`SearchState`]s and the timed [`PlanResult`].
//! Constructors and conversions return `Result` to surface invalid input
//! before any search starts.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost;
mod error;
mod planner;
mod point;
pub mod request;
pub mod schedule;
mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cost::{
    CostLookupError, CostSource, DEFAULT_SPEED_KMH, StraightLineConfigError,
    StraightLineCostSource, TravelCost,
};
pub use error::PlanError;
pub use planner::Planner;
pub use point::{Category, LatLng, Point, haversine_metres};
pub use request::{DayPlan, InvalidInputError, MAX_DWELL_MINUTES, PlaceInput, PlanRequest, Schedule};
pub use schedule::{
    Bounds, Distance, DistanceUnit, KILOMETRE_THRESHOLD_METRES, Move, PlanResult, Segment, Stay,
};
pub use state::{FoundPath, Progress, Resolution, SearchState};
