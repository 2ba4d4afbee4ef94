//! Wall-clock arithmetic for a single day.

use std::time::Duration;

use chrono::{NaiveTime, TimeDelta};

/// Clock time `elapsed` after `start`.
///
/// Planned days never run past their finish-by time, so `elapsed` stays
/// well inside a day and the result does not wrap in practice.
pub(crate) fn clock_after(start: NaiveTime, elapsed: Duration) -> NaiveTime {
    let delta = TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX);
    start.overflowing_add_signed(delta).0
}

/// `duration` rounded up to a whole number of minutes.
pub(crate) fn whole_minutes(duration: Duration) -> Duration {
    let seconds = duration
        .as_secs()
        .saturating_add(u64::from(duration.subsec_nanos() > 0));
    Duration::from_secs(seconds.div_ceil(60).saturating_mul(60))
}
