//! Plan command implementation for the daytrip CLI.

use std::io::{BufReader, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use daytrip_core::{
    CostSource, DEFAULT_SPEED_KMH, DayPlan, PlanError, PlanResult, Schedule, SearchState,
    StraightLineCostSource,
};
use daytrip_fs::open_utf8_file;
use daytrip_planner::{
    BranchAndBoundPlanner, CancellationToken, DEFAULT_MEAL_TOLERANCE, MealPolicy, PlannerConfig,
    ProgressReporter, SearchBudget,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_EXPENSE_PER_KM, ARG_MAX_EDGES, ARG_MEAL_POLICY, ARG_MEAL_TOLERANCE,
    ARG_PROGRESS_INTERVAL, ARG_SCHEDULE, ARG_SPEED_KMH, ARG_TIME_LIMIT, CliError, ENV_SCHEDULE,
};

/// Meal policy as spelled on the command line and in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MealPolicyArg {
    /// Discard orderings that miss a meal.
    Required,
    /// Prefer orderings that miss fewer meals.
    Preferred,
}

impl From<MealPolicyArg> for MealPolicy {
    fn from(value: MealPolicyArg) -> Self {
        match value {
            MealPolicyArg::Required => Self::Required,
            MealPolicyArg::Preferred => Self::Preferred,
        }
    }
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan every day of a schedule file. Each day that names at \
                 least one place is ordered for the earliest arrival at its \
                 end point, subject to its finish-by time and meal times. \
                 Travel is priced by great-circle distance at a constant \
                 speed.",
    about = "Plan every day of a schedule"
)]
#[ortho_config(prefix = "DAYTRIP")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing the schedule.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) schedule_path: Option<Utf8PathBuf>,
    /// Average travel speed in km/h.
    #[arg(long = ARG_SPEED_KMH, value_name = "km/h")]
    #[serde(default)]
    pub(crate) speed_kmh: Option<f64>,
    /// Travel expense charged per kilometre.
    #[arg(long = ARG_EXPENSE_PER_KM, value_name = "amount")]
    #[serde(default)]
    pub(crate) expense_per_km: Option<f64>,
    /// Minutes either side of a meal time that still count for the meal.
    #[arg(long = ARG_MEAL_TOLERANCE, value_name = "minutes")]
    #[serde(default)]
    pub(crate) meal_tolerance_minutes: Option<u64>,
    /// Whether meals are hard constraints or preferences.
    #[arg(long = ARG_MEAL_POLICY, value_enum)]
    #[serde(default)]
    pub(crate) meal_policy: Option<MealPolicyArg>,
    /// Stop each day's search after this many evaluated edges.
    #[arg(long = ARG_MAX_EDGES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_edges: Option<u64>,
    /// Stop each day's search after this many milliseconds.
    #[arg(long = ARG_TIME_LIMIT, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
    /// Log search progress at this interval while a day is planned.
    #[arg(long = ARG_PROGRESS_INTERVAL, value_name = "ms")]
    #[serde(default)]
    pub(crate) progress_interval_ms: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON schedule.
    pub(crate) schedule_path: Utf8PathBuf,
    /// Average travel speed in km/h.
    pub(crate) speed_kmh: f64,
    /// Travel expense per kilometre.
    pub(crate) expense_per_km: f64,
    /// Settings handed to the planner.
    pub(crate) planner: PlannerConfig,
    /// Progress logging interval; `None` disables progress logging.
    pub(crate) progress_interval: Option<Duration>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.schedule_path, ARG_SCHEDULE)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match daytrip_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let schedule_path = args.schedule_path.ok_or(CliError::MissingArgument {
            field: ARG_SCHEDULE,
            env: ENV_SCHEDULE,
        })?;

        let meal_tolerance = args
            .meal_tolerance_minutes
            .map_or(DEFAULT_MEAL_TOLERANCE, |minutes| {
                Duration::from_secs(minutes.saturating_mul(60))
            });
        let mut budget = SearchBudget::unlimited();
        if let Some(max_edges) = args.max_edges {
            budget = budget.with_max_edges(max_edges);
        }
        if let Some(limit) = args.time_limit_ms {
            budget = budget.with_time_limit(Duration::from_millis(limit));
        }
        let planner = PlannerConfig {
            meal_tolerance,
            meal_policy: args.meal_policy.map(MealPolicy::from).unwrap_or_default(),
            budget,
        };

        Ok(Self {
            schedule_path,
            speed_kmh: args.speed_kmh.unwrap_or(DEFAULT_SPEED_KMH),
            expense_per_km: args.expense_per_km.unwrap_or_default(),
            planner,
            progress_interval: args
                .progress_interval_ms
                .filter(|millis| *millis > 0)
                .map(Duration::from_millis),
        })
    }
}

/// Builds the cost source for the current plan invocation.
pub(super) trait CostSourceBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn CostSource>, CliError>;
}

pub(super) struct StraightLineBuilder;

impl CostSourceBuilder for StraightLineBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn CostSource>, CliError> {
        let source = StraightLineCostSource::new(config.speed_kmh)?
            .with_expense_per_km(config.expense_per_km)?;
        Ok(Box::new(source))
    }
}

/// The command's JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanResponse {
    /// Schedule name, echoed back.
    pub(crate) name: String,
    /// One entry per planned day, in schedule order.
    pub(crate) days: Vec<DayOutcome>,
}

/// What happened to one day of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum DayOutcome {
    /// The day was planned.
    Planned {
        /// The timed itinerary.
        plan: PlanResult,
    },
    /// No visiting order meets the day's constraints.
    Infeasible {
        /// Day concerned.
        date: NaiveDate,
        /// Whether the search was complete; `false` means one may exist.
        exhaustive: bool,
    },
    /// The day's input was rejected before planning.
    Invalid {
        /// Day concerned.
        date: NaiveDate,
        /// Why it was rejected.
        reason: String,
    },
}

pub(super) fn run_plan(args: PlanArgs, cancel: &CancellationToken) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &StraightLineBuilder, cancel, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn CostSourceBuilder,
    cancel: &CancellationToken,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_plan(args, builder, cancel)?;
    write_plan_response(writer, &response)
}

/// Plan every non-empty day, sharing `cancel` across all of their searches.
fn execute_plan(
    args: PlanArgs,
    builder: &dyn CostSourceBuilder,
    cancel: &CancellationToken,
) -> Result<PlanResponse, CliError> {
    let config = resolve_plan_config(args)?;
    let schedule = load_schedule(&config.schedule_path)?;
    let source = builder.build(&config)?;
    let planner = BranchAndBoundPlanner::with_config(source, config.planner.clone());

    let mut days = Vec::with_capacity(schedule.days.len());
    for day in &schedule.days {
        if day.is_empty() {
            log::info!("{}: no places to visit, skipping", day.date);
            continue;
        }
        if cancel.is_cancelled() {
            log::warn!("{}: planning was cancelled; the day is not searched", day.date);
        }
        days.push(plan_day(&planner, day, config.progress_interval, cancel)?);
    }
    Ok(PlanResponse {
        name: schedule.name,
        days,
    })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn plan_day<C>(
    planner: &BranchAndBoundPlanner<C>,
    day: &DayPlan,
    progress_interval: Option<Duration>,
    cancel: &CancellationToken,
) -> Result<DayOutcome, CliError>
where
    C: CostSource,
{
    let request = match day.to_request() {
        Ok(request) => request,
        Err(error) => {
            log::warn!("{}: rejected: {error}", day.date);
            return Ok(DayOutcome::Invalid {
                date: day.date,
                reason: error.to_string(),
            });
        }
    };

    let progress = ProgressReporter::new();
    let search = || planner.plan_with(&request, &progress, cancel);
    let outcome = match progress_interval {
        Some(interval) => with_progress_log(&progress, interval, day.date, search),
        None => search(),
    };

    match outcome {
        Ok(plan) => {
            log::info!(
                "{}: {} stops, finishing at {}",
                plan.date,
                plan.stays().count().saturating_sub(2),
                plan.finish_time
            );
            Ok(DayOutcome::Planned { plan })
        }
        Err(PlanError::InfeasibleSchedule) => Ok(infeasible(day.date, true)),
        Err(PlanError::InfeasibleScheduleProvisional) => Ok(infeasible(day.date, false)),
        Err(PlanError::InvalidInput(error)) => Ok(DayOutcome::Invalid {
            date: day.date,
            reason: error.to_string(),
        }),
        Err(source) => Err(CliError::Plan {
            date: day.date,
            source,
        }),
    }
}

fn infeasible(date: NaiveDate, exhaustive: bool) -> DayOutcome {
    log::warn!("{date}: no visiting order meets the constraints (exhaustive: {exhaustive})");
    DayOutcome::Infeasible { date, exhaustive }
}

/// Run `work` while a scoped thread logs `progress` every `interval`.
fn with_progress_log<T>(
    progress: &ProgressReporter,
    interval: Duration,
    date: NaiveDate,
    work: impl FnOnce() -> T,
) -> T {
    let (done, finished) = mpsc::channel::<()>();
    thread::scope(|scope| {
        scope.spawn(move || {
            while let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(interval) {
                log_snapshot(date, &progress.snapshot());
            }
        });
        let outcome = work();
        drop(done);
        outcome
    })
}

fn log_snapshot(date: NaiveDate, state: &SearchState) {
    match state {
        SearchState::Exploring(progress) => log::info!(
            "{date}: evaluated {} of at most {} edges",
            progress.edges_evaluated,
            progress.edges_upper_bound
        ),
        SearchState::Resolved(resolution) => log::info!(
            "{date}: search finished (exhaustive: {})",
            resolution.is_exhaustive()
        ),
    }
}

/// Loads a JSON-encoded [`Schedule`] from disk.
pub(super) fn load_schedule(path: &Utf8Path) -> Result<Schedule, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSchedule {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSchedule {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_response(writer: &mut dyn Write, response: &PlanResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerializePlanResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
