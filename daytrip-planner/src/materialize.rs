//! Turn a visiting order into a timed itinerary.

use std::time::Duration;

use chrono::NaiveTime;
use geo::{Coord, Haversine, Length as _, LineString};

use daytrip_core::{
    Bounds, CostSource, Distance, FoundPath, LatLng, Move, PlanError, PlanRequest, PlanResult,
    Point, Segment, Stay,
};

use crate::clock::clock_after;
use crate::memo::CostMemo;

/// Render `path` as alternating stays and moves.
///
/// Costs are looked up afresh through `source`; prefer
/// [`BranchAndBoundPlanner::plan`](crate::BranchAndBoundPlanner) when the
/// search and rendering happen together so each leg is priced once.
///
/// # Errors
///
/// Returns [`PlanError::CostLookup`] when a leg cannot be priced.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use daytrip_core::{Category, PlanRequest, Resolution};
/// use daytrip_core::test_support::{FixedMinutesCostSource, point};
/// use daytrip_planner::{BranchAndBoundPlanner, materialize};
///
/// let hotel = point("Hotel", 0.0, 0.0, Category::Lodging, 0);
/// let request = PlanRequest {
///     date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
///     finish_by: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
///     meal_times: Vec::new(),
///     start: hotel.clone(),
///     end: hotel,
///     stops: vec![point("Gallery", 0.0, 0.01, Category::Sightseeing, 60)],
/// };
/// let source = FixedMinutesCostSource::uniform(15);
/// let planner = BranchAndBoundPlanner::new(&source);
///
/// let Resolution::Found(path) = planner.search(&request).expect("search runs") else {
///     panic!("expected a feasible day");
/// };
/// let result = materialize(&source, &request, &path).expect("legs priced");
/// assert_eq!(result.visiting_order(), vec!["Hotel", "Gallery", "Hotel"]);
/// ```
pub fn materialize<C>(
    source: &C,
    request: &PlanRequest,
    path: &FoundPath,
) -> Result<PlanResult, PlanError>
where
    C: CostSource + ?Sized,
{
    let mut memo = CostMemo::new(source, path.order.iter().collect());
    let order: Vec<usize> = (0..path.order.len()).collect();
    Materializer::new(&mut memo, request).render(&order, path)
}

/// Walks an index order over a [`CostMemo`], keeping a running clock.
pub(crate) struct Materializer<'m, 'a, C: ?Sized> {
    memo: &'m mut CostMemo<'a, C>,
    request: &'m PlanRequest,
}

impl<'m, 'a, C> Materializer<'m, 'a, C>
where
    C: CostSource + ?Sized,
{
    pub(crate) const fn new(memo: &'m mut CostMemo<'a, C>, request: &'m PlanRequest) -> Self {
        Self { memo, request }
    }

    pub(crate) fn render(
        &mut self,
        order: &[usize],
        path: &FoundPath,
    ) -> Result<PlanResult, PlanError> {
        let points: Vec<(usize, &'a Point)> = order
            .iter()
            .filter_map(|index| self.memo.point(*index).map(|point| (*index, point)))
            .collect();
        let last = points.len().saturating_sub(1);

        let mut segments = Vec::with_capacity(points.len().saturating_mul(2));
        let mut elapsed = Duration::ZERO;
        for (position, (index, point)) in points.iter().enumerate() {
            let dwell_minutes = if position == 0 || position == last {
                0
            } else {
                point.dwell_minutes
            };
            segments.push(Segment::Stay(Stay {
                name: point.name.clone(),
                category: point.category,
                position: LatLng::from(point.location),
                dwell_minutes,
                arrival: self.clock(elapsed),
            }));
            elapsed = elapsed
                .saturating_add(Duration::from_secs(u64::from(dwell_minutes).saturating_mul(60)));

            let Some((next_index, next)) = points.get(position.saturating_add(1)) else {
                break;
            };
            let cost = self.memo.cost(*index, *next_index)?;
            segments.push(Segment::Move(self.leg(
                point,
                next,
                cost.duration,
                cost.expense,
                elapsed,
            )));
            elapsed = elapsed.saturating_add(cost.duration);
        }

        Ok(PlanResult {
            date: self.request.date,
            finish_time: self.clock(elapsed),
            exhaustive: path.exhaustive,
            missed_meals: path.missed_meals,
            segments,
        })
    }

    fn leg(
        &self,
        from: &Point,
        to: &Point,
        duration: Duration,
        expense: f64,
        departed_after: Duration,
    ) -> Move {
        let line = self
            .memo
            .source()
            .path(from, to)
            .filter(|line| line.0.len() >= 2)
            .unwrap_or_else(|| LineString::from(vec![from.location, to.location]));
        let metres = Haversine.length(&line);
        let bounds = Bounds::of(&line).unwrap_or_else(|| endpoint_bounds(from.location, to.location));
        Move {
            distance: Distance::from_metres(metres),
            path: line.coords().copied().map(LatLng::from).collect(),
            bounds,
            departure: self.clock(departed_after),
            duration_minutes: duration.as_secs().div_ceil(60),
            expense,
        }
    }

    fn clock(&self, elapsed: Duration) -> NaiveTime {
        clock_after(self.request.start_time, elapsed)
    }
}

fn endpoint_bounds(a: Coord<f64>, b: Coord<f64>) -> Bounds {
    Bounds {
        south_west: LatLng {
            lat: a.y.min(b.y),
            lng: a.x.min(b.x),
        },
        north_east: LatLng {
            lat: a.y.max(b.y),
            lng: a.x.max(b.x),
        },
    }
}
