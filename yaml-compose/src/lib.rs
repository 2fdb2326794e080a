//! Library interface for the `yaml-compose` command.
//!
//! The binary is a thin wrapper: it parses [`cli::Args`], installs logging and
//! calls [`run`]. Discovery of the layer directory and the output sinks live
//! here so they can be tested without spawning a process.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod output;

use std::io::Write;

use yaml_compose::Composer;

use crate::cli::Args;
use crate::error::CliError;

/// Composes the files named by `args`, printing to `stdout` unless an output
/// path was given.
///
/// # Errors
///
/// Returns a [`CliError`] for the first failing step: base or layer directory
/// checks, listing the directory, composing, or writing the result.
pub fn run<W: Write>(args: &Args, stdout: &mut W) -> Result<(), CliError> {
    let layers = discovery::discover(&args.base)?;
    let document = Composer::new(args.base.clone(), layers)
        .extract_layer_path(args.extract_layer.as_str())
        .run()?;

    match &args.output {
        Some(path) => output::write_file(path, &document),
        None => output::print(stdout, &document),
    }
}
