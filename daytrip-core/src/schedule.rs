//! Timed, renderable planning results.
//!
//! A [`PlanResult`] is an alternating sequence of [`Stay`] and [`Move`]
//! segments. It owns all of its data and can be serialised as-is by the web
//! layer; each segment is tagged with its `kind`.

use chrono::{NaiveDate, NaiveTime};
use geo::{BoundingRect, LineString};

use crate::{Category, LatLng};

/// Distances at or above this many metres are reported in kilometres.
pub const KILOMETRE_THRESHOLD_METRES: f64 = 1000.0;

/// Unit of a reported [`Distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceUnit {
    /// Metres.
    #[cfg_attr(feature = "serde", serde(rename = "m"))]
    Metres,
    /// Kilometres.
    #[cfg_attr(feature = "serde", serde(rename = "km"))]
    Kilometres,
}

/// A distance expressed in a human-friendly unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distance {
    /// Magnitude in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: DistanceUnit,
}

impl Distance {
    /// Express `metres` in metres below one kilometre and in kilometres from
    /// one kilometre upwards.
    ///
    /// # Examples
    /// ```
    /// use daytrip_core::{Distance, DistanceUnit};
    ///
    /// assert_eq!(Distance::from_metres(999.0).unit, DistanceUnit::Metres);
    /// let km = Distance::from_metres(1500.0);
    /// assert_eq!(km.unit, DistanceUnit::Kilometres);
    /// assert_eq!(km.value, 1.5);
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "unit conversion")]
    pub fn from_metres(metres: f64) -> Self {
        if metres < KILOMETRE_THRESHOLD_METRES {
            Self {
                value: metres,
                unit: DistanceUnit::Metres,
            }
        } else {
            Self {
                value: metres / KILOMETRE_THRESHOLD_METRES,
                unit: DistanceUnit::Kilometres,
            }
        }
    }

    /// The distance in metres, whatever the unit.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "unit conversion")]
    pub fn metres(&self) -> f64 {
        match self.unit {
            DistanceUnit::Metres => self.value,
            DistanceUnit::Kilometres => self.value * KILOMETRE_THRESHOLD_METRES,
        }
    }
}

/// Axis-aligned bounds of a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Minimum latitude and longitude.
    pub south_west: LatLng,
    /// Maximum latitude and longitude.
    pub north_east: LatLng,
}

impl Bounds {
    /// Component-wise min/max over `line`; `None` when the line is empty.
    #[must_use]
    pub fn of(line: &LineString<f64>) -> Option<Self> {
        line.bounding_rect().map(|rect| Self {
            south_west: rect.min().into(),
            north_east: rect.max().into(),
        })
    }
}

/// Time spent at a point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stay {
    /// Point name.
    pub name: String,
    /// Point category.
    pub category: Category,
    /// Point position.
    pub position: LatLng,
    /// Time spent at the point.
    pub dwell_minutes: u32,
    /// Arrival clock time.
    pub arrival: NaiveTime,
}

/// Travel between two consecutive points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// Length of `path`.
    pub distance: Distance,
    /// Polyline followed, endpoints included.
    pub path: Vec<LatLng>,
    /// Bounds of `path`.
    pub bounds: Bounds,
    /// Departure clock time.
    pub departure: NaiveTime,
    /// Travel time, rounded up to whole minutes.
    pub duration_minutes: u64,
    /// Expense reported by the cost source.
    pub expense: f64,
}

/// One step of a materialised schedule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind")
)]
pub enum Segment {
    /// Time spent at a point.
    Stay(Stay),
    /// Travel between points.
    Move(Move),
}

/// A feasible, timed itinerary for one day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResult {
    /// Day that was planned.
    pub date: NaiveDate,
    /// Arrival time at the end point.
    pub finish_time: NaiveTime,
    /// Whether the search proved this ordering optimal. `false` when a
    /// budget or cancellation cut the search short.
    pub exhaustive: bool,
    /// Meal times left uncovered. Always zero when meals are required.
    pub missed_meals: usize,
    /// Alternating stays and moves, starting and ending with a stay.
    pub segments: Vec<Segment>,
}

impl PlanResult {
    /// Stays in visiting order.
    pub fn stays(&self) -> impl Iterator<Item = &Stay> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Stay(stay) => Some(stay),
            Segment::Move(_) => None,
        })
    }

    /// Moves in travel order.
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Move(leg) => Some(leg),
            Segment::Stay(_) => None,
        })
    }

    /// Names of the visited points in order, start and end included.
    #[must_use]
    pub fn visiting_order(&self) -> Vec<&str> {
        self.stays().map(|stay| stay.name.as_str()).collect()
    }
}
