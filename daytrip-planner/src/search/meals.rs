//! Meal windows measured from the day's start time.

use std::time::Duration;

use chrono::NaiveTime;

/// Inclusive window, in seconds relative to departure from the start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    earliest: i64,
    latest: i64,
}

/// The day's meal windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MealWindows {
    windows: Vec<Window>,
}

impl MealWindows {
    pub(crate) fn new(start_time: NaiveTime, meal_times: &[NaiveTime], tolerance: Duration) -> Self {
        let slack = i64::try_from(tolerance.as_secs()).unwrap_or(i64::MAX);
        let windows = meal_times
            .iter()
            .map(|meal| {
                let offset = (*meal - start_time).num_seconds();
                Window {
                    earliest: offset.saturating_sub(slack),
                    latest: offset.saturating_add(slack),
                }
            })
            .collect();
        Self { windows }
    }

    pub(crate) fn len(&self) -> usize {
        self.windows.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Indices of the windows overlapping a visit from `arrival` to
    /// `departure`, both ends inclusive.
    pub(crate) fn covering(
        &self,
        arrival: Duration,
        departure: Duration,
    ) -> impl Iterator<Item = usize> + '_ {
        let (from, until) = (seconds(arrival), seconds(departure));
        self.windows
            .iter()
            .enumerate()
            .filter(move |(_, window)| window.earliest <= until && from <= window.latest)
            .map(|(index, _)| index)
    }

    /// Whether window `index` ends before `moment`, so no visit starting
    /// later can overlap it.
    pub(crate) fn closed_by(&self, index: usize, moment: Duration) -> bool {
        self.windows
            .get(index)
            .is_some_and(|window| window.latest < seconds(moment))
    }
}

fn seconds(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const MINUTE: u64 = 60;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    #[fixture]
    fn lunch() -> MealWindows {
        MealWindows::new(
            time(9, 0),
            &[time(12, 0)],
            Duration::from_secs(90 * MINUTE),
        )
    }

    #[rstest]
    #[case(90, true)]
    #[case(89, false)]
    #[case(270, true)]
    #[case(271, false)]
    fn tolerance_is_inclusive(lunch: MealWindows, #[case] minutes: u64, #[case] covered: bool) {
        let at = Duration::from_secs(minutes * MINUTE);
        assert_eq!(lunch.covering(at, at).count() > 0, covered);
    }

    #[rstest]
    fn a_visit_ending_as_the_window_opens_covers_it(lunch: MealWindows) {
        let arrival = Duration::from_secs(30 * MINUTE);
        let departure = Duration::from_secs(90 * MINUTE);
        assert_eq!(lunch.covering(arrival, departure).count(), 1);
        assert_eq!(
            lunch.covering(arrival, departure - Duration::from_secs(1)).count(),
            0
        );
    }

    #[rstest]
    fn window_closes_after_its_latest_moment(lunch: MealWindows) {
        assert!(!lunch.closed_by(0, Duration::from_secs(270 * MINUTE)));
        assert!(lunch.closed_by(0, Duration::from_secs(271 * MINUTE)));
    }

    #[rstest]
    fn meals_before_departure_open_in_the_past() {
        let breakfast = MealWindows::new(
            time(9, 0),
            &[time(7, 0)],
            Duration::from_secs(90 * MINUTE),
        );
        assert!(breakfast.closed_by(0, Duration::ZERO));
        assert_eq!(breakfast.covering(Duration::ZERO, Duration::ZERO).count(), 0);
    }

    #[rstest]
    fn one_arrival_can_cover_overlapping_meals() {
        let meals = MealWindows::new(
            time(9, 0),
            &[time(11, 30), time(12, 30)],
            Duration::from_secs(60 * MINUTE),
        );
        let at = Duration::from_secs(180 * MINUTE);
        let hits: Vec<usize> = meals.covering(at, at).collect();
        assert_eq!(hits, vec![0, 1]);
        assert_eq!(meals.len(), 2);
    }
}
