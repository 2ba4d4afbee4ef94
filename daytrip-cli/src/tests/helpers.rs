//! Test helpers for composing schedule files and stub cost sources.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{NaiveDate, NaiveTime};
use daytrip_core::test_support::{FailingCostSource, FixedMinutesCostSource};
use daytrip_core::{Category, CostSource, DayPlan, PlaceInput, Schedule};
use tempfile::TempDir;

use crate::CliError;
use crate::plan::{CostSourceBuilder, PlanConfig};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// A scratch directory with a schedule path inside it.
pub(super) fn scratch_schedule() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let schedule_path = root.join("schedule.json");
    (tmp, schedule_path)
}

pub(super) fn write_schedule(path: &Utf8Path, schedule: &Schedule) {
    let payload = serde_json::to_string_pretty(schedule).expect("serialize schedule");
    write_utf8(path, payload.as_bytes());
}

pub(super) fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub(super) fn may_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
}

pub(super) fn place(name: &str, category: Category, dwell_minutes: i64) -> PlaceInput {
    PlaceInput {
        name: name.to_owned(),
        lat: 37.5,
        lng: 127.0,
        category,
        dwell_minutes,
    }
}

/// A day from a hotel, through a noodle bar for lunch, and back.
pub(super) fn lunch_day() -> DayPlan {
    let mut noodles = place("Noodles", Category::Food, 60);
    noodles.lat = 37.52;
    DayPlan {
        date: may_day(),
        start_time: Some(time(9, 0)),
        finish_by: Some(time(20, 0)),
        meal_times: vec![time(12, 0)],
        start: Some(place("Hotel", Category::Lodging, 0)),
        end: Some(place("Hotel", Category::Lodging, 0)),
        stops: vec![noodles],
    }
}

/// A day with nothing in it; planning skips it.
pub(super) fn empty_day(date: NaiveDate) -> DayPlan {
    DayPlan {
        date,
        start_time: None,
        finish_by: None,
        meal_times: Vec::new(),
        start: None,
        end: None,
        stops: Vec::new(),
    }
}

pub(super) fn schedule_of(days: Vec<DayPlan>) -> Schedule {
    Schedule {
        name: "Seoul".to_owned(),
        days,
    }
}

/// Hands out a clone of a fixed cost source regardless of configuration.
pub(super) struct FixedBuilder(pub(super) FixedMinutesCostSource);

impl CostSourceBuilder for FixedBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn CostSource>, CliError> {
        Ok(Box::new(self.0.clone()))
    }
}

/// Hands out a source that fails whenever `broken` is involved.
pub(super) struct FailingBuilder(pub(super) &'static str);

impl CostSourceBuilder for FailingBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn CostSource>, CliError> {
        Ok(Box::new(FailingCostSource::new(
            FixedMinutesCostSource::uniform(30),
            self.0,
        )))
    }
}
