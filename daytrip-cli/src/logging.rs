//! Diagnostic logging for the CLI.
//!
//! Library crates log through the `log` facade; the subscriber installed
//! here bridges those records and writes them to stderr so stdout carries
//! only the JSON response.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or unparsable.
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";

/// Install the stderr formatter, filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        log::debug!("logging already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn repeated_initialisation_is_harmless() {
        init_logging();
        init_logging();
        log::info!("logging initialised twice");
    }

    #[rstest]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
