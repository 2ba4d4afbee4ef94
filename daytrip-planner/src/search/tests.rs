//! Tests for the branch-and-bound search.

use chrono::{NaiveDate, NaiveTime};
use daytrip_core::test_support::{FixedMinutesCostSource, point};
use rstest::{fixture, rstest};

use super::*;

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

#[fixture]
fn request() -> PlanRequest {
    let hotel = point("Hotel", 0.0, 0.0, Category::Lodging, 0);
    PlanRequest {
        date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
        start_time: time(9, 0),
        finish_by: time(20, 0),
        meal_times: Vec::new(),
        start: hotel.clone(),
        end: hotel,
        stops: (0..4)
            .map(|i| point(&format!("S{i}"), 0.0, 0.0, Category::Sightseeing, 30))
            .collect(),
    }
}

fn run(
    request: &PlanRequest,
    config: &PlannerConfig,
    source: &FixedMinutesCostSource,
) -> (SearchOutcome, u64) {
    let mut points = vec![&request.start];
    points.extend(request.distinct_stops());
    points.push(&request.end);
    let mut memo = CostMemo::new(source, points);
    let progress = ProgressReporter::new();
    let cancel = CancellationToken::new();
    let hooks = SearchHooks {
        progress: &progress,
        cancel: &cancel,
    };
    let outcome = Search::new(request, config, &mut memo, hooks)
        .run()
        .expect("fixed costs never fail");
    (outcome, progress.progress().edges_evaluated)
}

#[rstest]
fn incumbent_is_only_replaced_by_strictly_better_scores() {
    let best = Incumbent {
        missed: 1,
        elapsed: Duration::from_secs(600),
        stops: vec![1],
    };
    assert!(best.beaten_by(0, Duration::from_secs(900)));
    assert!(best.beaten_by(1, Duration::from_secs(599)));
    assert!(!best.beaten_by(1, Duration::from_secs(600)));
    assert!(!best.beaten_by(2, Duration::ZERO));
}

#[rstest]
fn winning_order_is_bracketed_by_start_and_end(request: PlanRequest) {
    let (outcome, _) = run(
        &request,
        &PlannerConfig::default(),
        &FixedMinutesCostSource::uniform(10),
    );
    assert_eq!(outcome.order, vec![0, 1, 2, 3, 4, 5]);
}

#[rstest]
fn bounds_prune_most_of_a_uniform_tree(request: PlanRequest) {
    let (_, evaluated) = run(
        &request,
        &PlannerConfig::default(),
        &FixedMinutesCostSource::uniform(10),
    );
    // The first complete ordering already meets the lower bound, so every
    // later sibling is cut as soon as its edge is priced.
    assert!(evaluated < edge_upper_bound(4), "evaluated {evaluated}");
}

#[rstest]
fn a_hopeless_deadline_is_cut_at_the_first_layer(mut request: PlanRequest) {
    request.finish_by = time(10, 0);
    let (outcome, evaluated) = run(
        &request,
        &PlannerConfig::default(),
        &FixedMinutesCostSource::uniform(10),
    );
    assert_eq!(outcome.resolution, Resolution::Infeasible { exhaustive: true });
    // Sixteen bound lookups, then each first-layer edge is cut.
    assert_eq!(evaluated, 20);
}

#[rstest]
fn closed_meal_windows_prune_under_required_meals(mut request: PlanRequest) {
    request.meal_times = vec![time(9, 30)];
    request.stops.push(point("Late Lunch", 0.0, 0.0, Category::Food, 30));
    let source = FixedMinutesCostSource::uniform(60);
    let config = PlannerConfig {
        meal_tolerance: Duration::from_secs(15 * 60),
        ..PlannerConfig::default()
    };

    let (outcome, _) = run(&request, &config, &source);

    assert_eq!(outcome.resolution, Resolution::Infeasible { exhaustive: true });
}

#[rstest]
fn found_path_clears_start_and_end_dwell(mut request: PlanRequest) {
    request.start.dwell_minutes = 45;
    request.end.dwell_minutes = 45;
    request.stops.truncate(1);
    let (outcome, _) = run(
        &request,
        &PlannerConfig::default(),
        &FixedMinutesCostSource::uniform(10),
    );
    let Resolution::Found(path) = outcome.resolution else {
        panic!("expected a feasible ordering");
    };
    let dwell: Vec<u32> = path.order.iter().map(|point| point.dwell_minutes).collect();
    assert_eq!(dwell, vec![0, 30, 0]);
    assert_eq!(path.elapsed, Duration::from_secs(50 * 60));
    assert_eq!(path.finish_time, time(9, 50));
}
