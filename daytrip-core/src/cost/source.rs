//! Cost-source trait and the travel cost value it returns.

use std::time::Duration;

use geo::LineString;

use crate::Point;

use super::error::CostLookupError;

/// Price of travelling between two points.
///
/// Duration and expense are independent quantities; neither is derived from
/// the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelCost {
    /// Time spent travelling.
    pub duration: Duration,
    /// Monetary (or other) expense of the leg. Non-negative.
    pub expense: f64,
}

impl TravelCost {
    /// A leg that takes no time and costs nothing.
    pub const ZERO: Self = Self {
        duration: Duration::ZERO,
        expense: 0.0,
    };

    /// Construct a cost of `minutes` whole minutes with zero expense.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use daytrip_core::TravelCost;
    ///
    /// let cost = TravelCost::from_minutes(30);
    /// assert_eq!(cost.duration, Duration::from_secs(1800));
    /// assert_eq!(cost.expense, 0.0);
    /// ```
    #[must_use]
    pub const fn from_minutes(minutes: u64) -> Self {
        Self {
            duration: Duration::from_secs(minutes.saturating_mul(60)),
            expense: 0.0,
        }
    }
}

/// Price legs between points and, optionally, describe their geometry.
///
/// Implementations must return non-negative costs for every ordered pair,
/// including `from == to`, which must cost [`TravelCost::ZERO`]. Lookups may
/// be slow or fallible; a failure is reported as a [`CostLookupError`] and is
/// never replaced by a default.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use daytrip_core::{Category, CostLookupError, CostSource, Point, TravelCost};
///
/// struct TenMinutes;
///
/// impl CostSource for TenMinutes {
///     fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError> {
///         if from == to {
///             return Ok(TravelCost::ZERO);
///         }
///         Ok(TravelCost::from_minutes(10))
///     }
/// }
///
/// let a = Point::new("A", Coord { x: 0.0, y: 0.0 }, Category::Lodging, 0);
/// let b = Point::new("B", Coord { x: 0.1, y: 0.0 }, Category::Food, 30);
/// assert_eq!(TenMinutes.cost(&a, &b)?, TravelCost::from_minutes(10));
/// assert!(TenMinutes.path(&a, &b).is_none());
/// # Ok::<(), CostLookupError>(())
/// ```
pub trait CostSource {
    /// Return the travel cost from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`CostLookupError`] when the provider cannot price the leg.
    fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError>;

    /// Return the polyline followed between `from` and `to`, endpoints
    /// included.
    ///
    /// Sources without route geometry return `None`; callers then fall back
    /// to the straight segment between the two points.
    fn path(&self, from: &Point, to: &Point) -> Option<LineString<f64>> {
        let _ = (from, to);
        None
    }
}

impl<T> CostSource for &T
where
    T: CostSource + ?Sized,
{
    fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError> {
        (**self).cost(from, to)
    }

    fn path(&self, from: &Point, to: &Point) -> Option<LineString<f64>> {
        (**self).path(from, to)
    }
}

impl<T> CostSource for Box<T>
where
    T: CostSource + ?Sized,
{
    fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError> {
        (**self).cost(from, to)
    }

    fn path(&self, from: &Point, to: &Point) -> Option<LineString<f64>> {
        (**self).path(from, to)
    }
}
