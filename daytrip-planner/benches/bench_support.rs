//! Benchmark support utilities for the day planner.
//!
//! Provides deterministic stop generation scattered around a city centre so
//! benchmark inputs are reproducible between runs.

use chrono::{NaiveDate, NaiveTime};
use daytrip_core::{Category, PlanRequest, Point};
use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Categories to cycle through when generating stops.
const CATEGORIES: [Category; 3] = [Category::Sightseeing, Category::Food, Category::Sightseeing];

/// City centre around which stops are scattered.
const CENTRE: Coord<f64> = Coord { x: 126.978, y: 37.566 };

/// Maximum offset of a stop from the centre, in degrees (~3 km).
const SPREAD: f64 = 0.03;

/// Generate `count` stops around the centre with 20 to 90 minute dwells.
///
/// Every third stop is a food stop, so meal times can be satisfied.
#[must_use]
pub fn generate_stops(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            #[expect(
                clippy::integer_division_remainder_used,
                reason = "Modulo for cyclic category assignment is intentional"
            )]
            let category = CATEGORIES
                .get(i % CATEGORIES.len())
                .copied()
                .unwrap_or(Category::Sightseeing);

            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let location = Coord {
                x: CENTRE.x + rng.gen_range(-SPREAD..SPREAD),
                y: CENTRE.y + rng.gen_range(-SPREAD..SPREAD),
            };

            Point::new(format!("Stop {i}"), location, category, rng.gen_range(20..=90))
        })
        .collect()
}

/// A 08:00 to 22:00 day from a central hotel with lunch and dinner.
#[must_use]
pub fn build_request(stops: Vec<Point>) -> PlanRequest {
    let hotel = Point::new("Hotel", CENTRE, Category::Lodging, 0);
    PlanRequest {
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default(),
        start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
        finish_by: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
        meal_times: [(12, 30), (18, 30)]
            .into_iter()
            .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
            .collect(),
        start: hotel.clone(),
        end: hotel,
        stops,
    }
}
