//! Argument parsing for the `plan` subcommand.

use super::*;
use crate::plan::MealPolicyArg;
use camino::Utf8PathBuf;
use rstest::rstest;

fn parse(argv: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(argv)
}

#[rstest]
fn plan_accepts_a_positional_schedule() {
    let cli = parse(&["daytrip", "plan", "trip.json"]).expect("arguments parse");
    let Command::Plan(args) = cli.command;
    assert_eq!(args.schedule_path, Some(Utf8PathBuf::from("trip.json")));
    assert_eq!(args.meal_policy, None);
    assert_eq!(args.max_edges, None);
}

#[rstest]
fn plan_accepts_every_search_flag() {
    let cli = parse(&[
        "daytrip",
        "plan",
        "trip.json",
        "--speed-kmh",
        "12.5",
        "--expense-per-km",
        "0.4",
        "--meal-tolerance-minutes",
        "30",
        "--meal-policy",
        "preferred",
        "--max-edges",
        "5000",
        "--time-limit-ms",
        "200",
        "--progress-interval-ms",
        "50",
    ])
    .expect("arguments parse");
    let Command::Plan(args) = cli.command;
    assert_eq!(args.speed_kmh, Some(12.5));
    assert_eq!(args.expense_per_km, Some(0.4));
    assert_eq!(args.meal_tolerance_minutes, Some(30));
    assert_eq!(args.meal_policy, Some(MealPolicyArg::Preferred));
    assert_eq!(args.max_edges, Some(5000));
    assert_eq!(args.time_limit_ms, Some(200));
    assert_eq!(args.progress_interval_ms, Some(50));
}

#[rstest]
#[case::unknown_policy(&["daytrip", "plan", "--meal-policy", "sometimes"])]
#[case::negative_edges(&["daytrip", "plan", "--max-edges", "-1"])]
#[case::missing_subcommand(&["daytrip"])]
fn malformed_arguments_are_rejected(#[case] argv: &[&str]) {
    let err = parse(argv).expect_err("arguments should be rejected");
    let cli_err = CliError::from(err);
    assert!(matches!(cli_err, CliError::ArgumentParsing(_)));
}
