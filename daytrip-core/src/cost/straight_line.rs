//! Great-circle cost source.

use std::time::Duration;

use crate::Point;

use super::error::{CostLookupError, StraightLineConfigError};
use super::source::{CostSource, TravelCost};

/// Default average travel speed in km/h (a brisk walk).
pub const DEFAULT_SPEED_KMH: f64 = 5.0;

/// Prices legs by great-circle distance at a constant average speed.
///
/// Durations are rounded to the nearest whole minute so that materialised
/// schedules stay on minute boundaries. Expense is proportional to distance
/// and defaults to zero.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use daytrip_core::{Category, CostSource, Point, StraightLineCostSource};
///
/// let source = StraightLineCostSource::new(60.0)?;
/// let a = Point::new("A", Coord { x: 0.0, y: 0.0 }, Category::Lodging, 0);
/// let b = Point::new("B", Coord { x: 0.0, y: 0.5 }, Category::Food, 30);
///
/// // About 55.6 km at 60 km/h.
/// let cost = source.cost(&a, &b)?;
/// assert_eq!(cost.duration.as_secs(), 56 * 60);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLineCostSource {
    speed_kmh: f64,
    expense_per_km: f64,
}

impl Default for StraightLineCostSource {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            expense_per_km: 0.0,
        }
    }
}

impl StraightLineCostSource {
    /// Construct a source travelling at `speed_kmh` with zero expense.
    ///
    /// # Errors
    ///
    /// Returns [`StraightLineConfigError::InvalidSpeed`] unless the speed is
    /// positive and finite.
    pub fn new(speed_kmh: f64) -> Result<Self, StraightLineConfigError> {
        if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
            return Err(StraightLineConfigError::InvalidSpeed(speed_kmh));
        }
        Ok(Self {
            speed_kmh,
            expense_per_km: 0.0,
        })
    }

    /// Charge `expense_per_km` for every kilometre travelled.
    ///
    /// # Errors
    ///
    /// Returns [`StraightLineConfigError::InvalidExpense`] for negative or
    /// non-finite rates.
    pub fn with_expense_per_km(mut self, expense_per_km: f64) -> Result<Self, StraightLineConfigError> {
        if !(expense_per_km.is_finite() && expense_per_km >= 0.0) {
            return Err(StraightLineConfigError::InvalidExpense(expense_per_km));
        }
        self.expense_per_km = expense_per_km;
        Ok(self)
    }

    /// Average travel speed in km/h.
    #[must_use]
    pub const fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }
}

impl CostSource for StraightLineCostSource {
    #[expect(
        clippy::float_arithmetic,
        reason = "durations are derived from floating-point distances"
    )]
    fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError> {
        let distance_km = from.distance_to(to) / 1000.0;
        let minutes = (distance_km / self.speed_kmh * 60.0).round();
        let duration = Duration::try_from_secs_f64(minutes * 60.0).map_err(|_| {
            CostLookupError::new(
                from.name.as_str(),
                to.name.as_str(),
                format!("distance produced an invalid duration of {minutes} minutes"),
            )
        })?;
        Ok(TravelCost {
            duration,
            expense: distance_km * self.expense_per_km,
        })
    }
}
