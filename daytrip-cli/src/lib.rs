//! Command-line interface for planning day trips.
//!
//! `daytrip plan <schedule.json>` reads a multi-day schedule, plans every
//! day that names at least one place and prints the outcome of each day as
//! JSON on stdout.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use daytrip_planner::CancellationToken;

mod error;
mod logging;
mod plan;

pub use error::CliError;
pub use logging::init_logging;

use plan::PlanArgs;

const ARG_SCHEDULE: &str = "schedule";
const ARG_SPEED_KMH: &str = "speed-kmh";
const ARG_EXPENSE_PER_KM: &str = "expense-per-km";
const ARG_MEAL_TOLERANCE: &str = "meal-tolerance-minutes";
const ARG_MEAL_POLICY: &str = "meal-policy";
const ARG_MAX_EDGES: &str = "max-edges";
const ARG_TIME_LIMIT: &str = "time-limit-ms";
const ARG_PROGRESS_INTERVAL: &str = "progress-interval-ms";
const ENV_SCHEDULE: &str = "DAYTRIP_CMDS_PLAN_SCHEDULE_PATH";

/// Run the daytrip CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure: argument parsing,
/// configuration layering, reading the schedule, or planning a day.
pub fn run() -> Result<(), CliError> {
    run_until_cancelled(&CancellationToken::new())
}

/// Like [`run`], stopping every outstanding search once `cancel` fires.
///
/// The token is shared by all days of the schedule. A day still searching
/// when it fires keeps its best ordering so far, marked non-exhaustive;
/// days reached afterwards price no travel and are reported as
/// provisionally infeasible.
///
/// # Errors
///
/// As for [`run`].
pub fn run_until_cancelled(cancel: &CancellationToken) -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args, cancel),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "daytrip",
    about = "Plan the visiting order of each day of a trip",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan every day of a schedule file.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
