//! Facade crate for the day-trip planning engine.
//!
//! This crate re-exports the core domain types and exposes the
//! branch-and-bound planner behind a feature flag.
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use daytrip_engine::{
//!     BranchAndBoundPlanner, Category, DayPlan, PlaceInput, Planner, StraightLineCostSource,
//! };
//!
//! let place = |name: &str, lat: f64, category, dwell_minutes| PlaceInput {
//!     name: name.to_owned(),
//!     lat,
//!     lng: 126.98,
//!     category,
//!     dwell_minutes,
//! };
//! let day = DayPlan {
//!     date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
//!     start_time: NaiveTime::from_hms_opt(9, 0, 0),
//!     finish_by: NaiveTime::from_hms_opt(18, 0, 0),
//!     meal_times: Vec::new(),
//!     start: Some(place("Hotel", 37.560, Category::Lodging, 0)),
//!     end: Some(place("Hotel", 37.560, Category::Lodging, 0)),
//!     stops: vec![place("Palace", 37.579, Category::Sightseeing, 90)],
//! };
//!
//! let request = day.to_request()?;
//! let planner = BranchAndBoundPlanner::new(StraightLineCostSource::default());
//! let plan = planner.plan(&request)?;
//! assert_eq!(plan.visiting_order(), vec!["Hotel", "Palace", "Hotel"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub use daytrip_core::{
    Bounds, Category, CostLookupError, CostSource, DayPlan, Distance, DistanceUnit, FoundPath,
    InvalidInputError, LatLng, Move, PlaceInput, PlanError, PlanRequest, PlanResult, Planner,
    Point, Progress, Resolution, Schedule, SearchState, Segment, Stay, StraightLineCostSource,
    TravelCost,
};

#[cfg(feature = "test-support")]
pub use daytrip_core::test_support;

#[cfg(feature = "planner-bnb")]
pub use daytrip_planner::{
    BranchAndBoundPlanner, CancellationToken, MealPolicy, PlannerConfig, ProgressReporter,
    SearchBudget, materialize,
};
