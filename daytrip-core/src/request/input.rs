//! Raw day-plan input and its conversion into a [`PlanRequest`].

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use geo::Coord;

use crate::{Category, Point};

use super::{InvalidInputError, PlanRequest};

/// Longest dwell accepted for a single point.
pub const MAX_DWELL_MINUTES: i64 = 24 * 60;

/// A place as supplied by the caller, before validation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceInput {
    /// Display name.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Kind of place.
    pub category: Category,
    /// Requested dwell in minutes. Negative values are rejected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dwell_minutes: i64,
}

impl PlaceInput {
    fn to_point(&self) -> Result<Point, InvalidInputError> {
        let coordinates_valid = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);
        if !coordinates_valid {
            return Err(InvalidInputError::InvalidCoordinates {
                name: self.name.clone(),
                lat: self.lat,
                lng: self.lng,
            });
        }
        if self.dwell_minutes < 0 {
            return Err(InvalidInputError::NegativeDwell {
                name: self.name.clone(),
                minutes: self.dwell_minutes,
            });
        }
        let dwell_minutes = u32::try_from(self.dwell_minutes)
            .ok()
            .filter(|_| self.dwell_minutes <= MAX_DWELL_MINUTES)
            .ok_or_else(|| InvalidInputError::DwellTooLong {
                name: self.name.clone(),
                minutes: self.dwell_minutes,
            })?;
        Ok(Point::new(
            self.name.as_str(),
            Coord {
                x: self.lng,
                y: self.lat,
            },
            self.category,
            dwell_minutes,
        ))
    }
}

/// One stored day of an itinerary, before validation.
///
/// Every field other than the date may be missing; [`DayPlan::to_request`]
/// decides whether the day can be planned.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayPlan {
    /// Calendar day.
    pub date: NaiveDate,
    /// Departure time from the start point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_time: Option<NaiveTime>,
    /// Latest acceptable arrival at the end point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub finish_by: Option<NaiveTime>,
    /// Target meal times.
    #[cfg_attr(feature = "serde", serde(default))]
    pub meal_times: Vec<NaiveTime>,
    /// First place of the day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<PlaceInput>,
    /// Last place of the day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<PlaceInput>,
    /// Places to visit in between.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stops: Vec<PlaceInput>,
}

impl DayPlan {
    /// Whether the day names no places at all.
    ///
    /// Such days have nothing to plan and are skipped when planning a
    /// [`Schedule`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.stops.is_empty()
    }

    /// Validate the day and build a [`PlanRequest`].
    ///
    /// Start and end dwell is forced to zero. Duplicate stops, and stops equal
    /// to the start or end point, are removed; the first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidInputError`] describing the first problem found.
    ///
    /// # Examples
    /// ```rust
    /// use chrono::{NaiveDate, NaiveTime};
    /// use daytrip_core::{Category, DayPlan, InvalidInputError, PlaceInput};
    ///
    /// let hotel = PlaceInput {
    ///     name: "Hotel".into(),
    ///     lat: 37.56,
    ///     lng: 126.97,
    ///     category: Category::Lodging,
    ///     dwell_minutes: 0,
    /// };
    /// let mut day = DayPlan {
    ///     date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0),
    ///     finish_by: NaiveTime::from_hms_opt(20, 0, 0),
    ///     meal_times: Vec::new(),
    ///     start: Some(hotel.clone()),
    ///     end: Some(hotel),
    ///     stops: Vec::new(),
    /// };
    /// assert!(day.to_request().is_ok());
    ///
    /// day.end = None;
    /// assert_eq!(day.to_request(), Err(InvalidInputError::MissingEnd));
    /// ```
    pub fn to_request(&self) -> Result<PlanRequest, InvalidInputError> {
        let start = self
            .start
            .as_ref()
            .ok_or(InvalidInputError::MissingStart)?
            .to_point()?
            .without_dwell();
        let end = self
            .end
            .as_ref()
            .ok_or(InvalidInputError::MissingEnd)?
            .to_point()?
            .without_dwell();
        let start_time = self.start_time.ok_or(InvalidInputError::MissingStartTime)?;
        let finish_by = self.finish_by.ok_or(InvalidInputError::MissingFinishBy)?;

        let candidates = self
            .stops
            .iter()
            .map(PlaceInput::to_point)
            .collect::<Result<Vec<_>, _>>()?;
        let mut seen: HashSet<Point> = HashSet::from([start.clone(), end.clone()]);
        let stops: Vec<Point> = candidates
            .into_iter()
            .filter(|stop| seen.insert(stop.clone()))
            .collect();
        let dropped = self.stops.len() - stops.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} repeated stop(s) from day {}", self.date);
        }

        let request = PlanRequest {
            date: self.date,
            start_time,
            finish_by,
            meal_times: self.meal_times.clone(),
            start,
            end,
            stops,
        };
        request.validate()?;
        Ok(request)
    }
}

impl TryFrom<&DayPlan> for PlanRequest {
    type Error = InvalidInputError;

    fn try_from(day: &DayPlan) -> Result<Self, Self::Error> {
        day.to_request()
    }
}

impl TryFrom<DayPlan> for PlanRequest {
    type Error = InvalidInputError;

    fn try_from(day: DayPlan) -> Result<Self, Self::Error> {
        day.to_request()
    }
}

/// A named, multi-day itinerary.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    /// Itinerary name, echoed back in planning responses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Days in calendar order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub days: Vec<DayPlan>,
}
