//! Tracing subscriber setup for the CLI.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::CliError;

const DEFAULT_FILTER: &str = "warn";

/// Installs a compact fmt subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`, defaulting to `warn`. Stdout stays
/// reserved for the composed document.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when the filter is invalid or a global
/// subscriber is already installed.
pub fn init() -> Result<(), CliError> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|err| CliError::Logging(err.to_string()))?;
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
