//! Error types emitted by the daytrip CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use daytrip_core::{PlanError, StraightLineConfigError};
use thiserror::Error;

/// Errors emitted by the daytrip CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing argument.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument naming the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument naming the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument naming the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the schedule file failed.
    #[error("failed to open schedule at {path:?}: {source}")]
    OpenSchedule {
        /// Schedule path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Schedule JSON could not be decoded.
    #[error("failed to parse schedule JSON at {path:?}: {source}")]
    ParseSchedule {
        /// Schedule path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The configured cost source parameters were rejected.
    #[error("invalid travel cost settings: {0}")]
    CostSourceConfig(#[from] StraightLineConfigError),
    /// Planning a day failed for a reason other than infeasibility.
    #[error("failed to plan {date}: {source}")]
    Plan {
        /// Day being planned.
        date: NaiveDate,
        /// Planner failure.
        #[source]
        source: PlanError,
    },
    /// Serializing the plan response failed.
    #[error("failed to serialize plan response: {0}")]
    SerializePlanResponse(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
