//! Deterministic cost sources and builders for unit and behaviour tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use geo::{Coord, LineString};

use crate::{Category, CostLookupError, CostSource, Point, TravelCost};

/// Construct a [`Point`] from plain values.
///
/// # Examples
/// ```rust
/// use daytrip_core::Category;
/// use daytrip_core::test_support::point;
///
/// let cafe = point("Cafe", 37.5, 127.0, Category::Food, 45);
/// assert_eq!(cafe.lat(), 37.5);
/// assert_eq!(cafe.dwell_minutes, 45);
/// ```
#[must_use]
pub fn point(name: &str, lat: f64, lng: f64, category: Category, dwell_minutes: u32) -> Point {
    Point::new(name, Coord { x: lng, y: lat }, category, dwell_minutes)
}

/// A [`CostSource`] pricing legs by point name.
///
/// Legs are symmetric. Unlisted legs cost the default number of minutes and
/// a point always reaches itself for free.
#[derive(Debug, Clone, Default)]
pub struct FixedMinutesCostSource {
    default_minutes: u64,
    legs: HashMap<(String, String), u64>,
}

impl FixedMinutesCostSource {
    /// Price every leg between distinct points at `minutes`.
    #[must_use]
    pub fn uniform(minutes: u64) -> Self {
        Self {
            default_minutes: minutes,
            legs: HashMap::new(),
        }
    }

    /// Price the leg between `a` and `b` (either direction) at `minutes`.
    #[must_use]
    pub fn with_leg(mut self, a: &str, b: &str, minutes: u64) -> Self {
        self.legs.insert(Self::key(a, b), minutes);
        self
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_owned(), b.to_owned())
        } else {
            (b.to_owned(), a.to_owned())
        }
    }
}

impl CostSource for FixedMinutesCostSource {
    fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError> {
        if from == to {
            return Ok(TravelCost::ZERO);
        }
        let minutes = self
            .legs
            .get(&Self::key(&from.name, &to.name))
            .copied()
            .unwrap_or(self.default_minutes);
        Ok(TravelCost::from_minutes(minutes))
    }
}

/// A [`CostSource`] that fails for every leg touching one named point.
#[derive(Debug, Clone)]
pub struct FailingCostSource {
    inner: FixedMinutesCostSource,
    broken: String,
}

impl FailingCostSource {
    /// Fail any leg to or from `broken`; price the rest with `inner`.
    #[must_use]
    pub fn new(inner: FixedMinutesCostSource, broken: &str) -> Self {
        Self {
            inner,
            broken: broken.to_owned(),
        }
    }
}

impl CostSource for FailingCostSource {
    fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError> {
        if from.name == self.broken || to.name == self.broken {
            return Err(CostLookupError::new(
                from.name.as_str(),
                to.name.as_str(),
                "provider unavailable",
            ));
        }
        self.inner.cost(from, to)
    }
}

/// Wraps a [`CostSource`] and counts the lookups that reach it.
#[derive(Debug, Default)]
pub struct CountingCostSource<C> {
    inner: C,
    calls: AtomicUsize,
}

impl<C> CountingCostSource<C> {
    /// Count lookups forwarded to `inner`.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Lookups seen so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<C: CostSource> CostSource for CountingCostSource<C> {
    fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.cost(from, to)
    }

    fn path(&self, from: &Point, to: &Point) -> Option<LineString<f64>> {
        self.inner.path(from, to)
    }
}

/// Wraps a [`CostSource`] and sleeps before every lookup, like a remote
/// routing service would.
#[derive(Debug, Clone)]
pub struct SlowCostSource<C> {
    inner: C,
    delay: Duration,
}

impl<C> SlowCostSource<C> {
    /// Delay every lookup forwarded to `inner` by `delay`.
    #[must_use]
    pub const fn new(inner: C, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<C: CostSource> CostSource for SlowCostSource<C> {
    fn cost(&self, from: &Point, to: &Point) -> Result<TravelCost, CostLookupError> {
        thread::sleep(self.delay);
        self.inner.cost(from, to)
    }

    fn path(&self, from: &Point, to: &Point) -> Option<LineString<f64>> {
        self.inner.path(from, to)
    }
}
