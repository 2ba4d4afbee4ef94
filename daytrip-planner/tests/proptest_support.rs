//! Proptest strategies and a brute-force oracle for planner property tests.
//!
//! Instances are small enough (at most six stops) that every visiting order
//! can be enumerated, which lets the tests compare the branch-and-bound
//! answer with the true optimum.

use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use daytrip_core::test_support::{FixedMinutesCostSource, point};
use daytrip_core::{Category, CostSource, PlanRequest, PlanResult, Point};
use proptest::prelude::*;

/// A planning request together with the costs its legs are priced at.
#[derive(Debug, Clone)]
pub struct Instance {
    /// The day to plan.
    pub request: PlanRequest,
    /// Symmetric leg costs keyed by point name.
    pub source: FixedMinutesCostSource,
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Food),
        Just(Category::Sightseeing),
        Just(Category::Lodging),
    ]
}

/// Up to `max_stops` uniquely named stops with dwell times of 0 to 90 minutes.
pub fn stops_strategy(max_stops: usize) -> impl Strategy<Value = Vec<Point>> {
    proptest::collection::vec((category_strategy(), 0_u32..=90), 0..=max_stops).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (category, dwell))| {
                    point(&format!("S{index}"), 37.5, 127.0, category, dwell)
                })
                .collect()
        },
    )
}

/// A day from 09:00 with random stops, leg costs and finish-by time.
pub fn instance_strategy(max_stops: usize) -> impl Strategy<Value = Instance> {
    (
        stops_strategy(max_stops),
        proptest::collection::vec(1_u64..=60, 64),
        60_i64..=720,
        proptest::collection::vec(0_i64..=600, 0..=2),
    )
        .prop_map(|(stops, minutes, horizon_minutes, meal_offsets)| {
            let names = point_names(&stops);
            let mut source = FixedMinutesCostSource::uniform(30);
            let mut costs = minutes.into_iter().cycle();
            for (i, a) in names.iter().enumerate() {
                for b in names.iter().skip(i + 1) {
                    if let Some(leg) = costs.next() {
                        source = source.with_leg(a, b, leg);
                    }
                }
            }
            let start_time = clock(9, 0);
            let request = PlanRequest {
                date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
                start_time,
                finish_by: start_time + TimeDelta::minutes(horizon_minutes),
                meal_times: meal_offsets
                    .into_iter()
                    .map(|offset| start_time + TimeDelta::minutes(offset))
                    .collect(),
                start: point("Hotel", 37.5, 127.0, Category::Lodging, 0),
                end: point("Station", 37.6, 127.0, Category::Lodging, 0),
                stops,
            };
            Instance { request, source }
        })
}

fn point_names(stops: &[Point]) -> Vec<String> {
    let mut names = vec!["Hotel".to_owned(), "Station".to_owned()];
    names.extend(stops.iter().map(|stop| stop.name.clone()));
    names
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

fn minutes(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs().div_euclid(60)).expect("test durations fit")
}

/// Elapsed time of visiting `stops` in order, or `None` past the deadline.
fn elapsed_for(instance: &Instance, stops: &[&Point]) -> Option<Duration> {
    let request = &instance.request;
    let mut previous = &request.start;
    let mut elapsed = Duration::ZERO;
    for stop in stops {
        elapsed += instance.source.cost(previous, stop).ok()?.duration;
        elapsed += Duration::from_secs(u64::from(stop.dwell_minutes) * 60);
        if elapsed > request.horizon() {
            return None;
        }
        previous = stop;
    }
    elapsed += instance.source.cost(previous, &request.end).ok()?.duration;
    (elapsed <= request.horizon()).then_some(elapsed)
}

/// Fastest feasible elapsed time over every visiting order, ignoring meals.
pub fn brute_force_best(instance: &Instance) -> Option<Duration> {
    let stops = instance.request.distinct_stops();
    let mut best = None;
    permute(&stops, &mut Vec::new(), &mut vec![false; stops.len()], &mut |order| {
        if let Some(elapsed) = elapsed_for(instance, order) {
            best = Some(best.map_or(elapsed, |current: Duration| current.min(elapsed)));
        }
    });
    best
}

fn permute<'a>(
    items: &[&'a Point],
    prefix: &mut Vec<&'a Point>,
    used: &mut [bool],
    visit: &mut dyn FnMut(&[&'a Point]),
) {
    if prefix.len() == items.len() {
        visit(prefix);
        return;
    }
    for (index, item) in items.iter().enumerate() {
        if used.get(index).copied().unwrap_or(true) {
            continue;
        }
        set(used, index, true);
        prefix.push(item);
        permute(items, prefix, used, visit);
        prefix.pop();
        set(used, index, false);
    }
}

fn set(flags: &mut [bool], index: usize, value: bool) {
    if let Some(flag) = flags.get_mut(index) {
        *flag = value;
    }
}

/// Whether some food stay in `result` overlaps the window around `meal`.
pub fn meal_is_covered(result: &PlanResult, meal: NaiveTime, tolerance: Duration) -> bool {
    let start = result
        .stays()
        .next()
        .map(|stay| stay.arrival)
        .expect("plans start with a stay");
    let offset = (meal - start).num_minutes();
    let slack = minutes(tolerance);
    result
        .stays()
        .filter(|stay| stay.category == Category::Food)
        .any(|stay| {
            let arrival = (stay.arrival - start).num_minutes();
            let departure = arrival + i64::from(stay.dwell_minutes);
            offset - slack <= departure && arrival <= offset + slack
        })
}
