//! Error types for `yaml-compose`.

use camino::Utf8PathBuf;
use thiserror::Error;
use yaml_compose::ComposeError;

/// Errors surfaced by the `yaml-compose` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The base file could not be inspected.
    #[error("check base file {path}: {source}")]
    CheckBase {
        /// Base file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The base file does not exist.
    #[error("{0} not found")]
    BaseNotFound(Utf8PathBuf),

    /// The layer directory could not be inspected.
    #[error("check layer directory {path}: {source}")]
    CheckLayerDir {
        /// Layer directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The layer directory does not exist.
    #[error("{0} not found")]
    LayerDirNotFound(Utf8PathBuf),

    /// The layer directory path exists but is not a directory.
    #[error("check layer directory: {0} is not a directory")]
    LayerDirNotDirectory(Utf8PathBuf),

    /// Listing the layer directory failed.
    #[error("read layer directory {path}: {source}")]
    ReadLayerDir {
        /// Layer directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The composition engine failed.
    #[error("compose files: {0}")]
    Compose(#[from] ComposeError),

    /// The parent directory of the output file could not be created.
    #[error("create output directory {path}: {source}")]
    CreateOutputDir {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the output file failed.
    #[error("write output file {path}: {source}")]
    WriteOutput {
        /// Output file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the composed document to stdout failed.
    #[error("print output: {0}")]
    Print(#[source] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
