//! Errors surfaced by a composition run.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::document::LayerError;
use crate::dot_path::PathSyntaxError;
use crate::layer_name::LayerNameError;

/// Result alias used throughout the composer.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors that stop a composition. The first failure wins; later layers are
/// not processed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// A layer file name lacks its numeric order prefix.
    #[error(transparent)]
    LayerName(#[from] LayerNameError),

    /// The extract path is not a valid dot-path.
    #[error("invalid extract layer path '{path}': {source}")]
    ExtractPath {
        /// The extract path as supplied.
        path: String,
        /// Why it failed to parse.
        #[source]
        source: PathSyntaxError,
    },

    /// The base file could not be read.
    #[error("failed to read base compose file '{path}': {source}")]
    ReadBase {
        /// Path of the base file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The base file could not be decoded.
    #[error("failed to parse base compose file '{path}': {source}")]
    ParseBase {
        /// Path of the base file.
        path: Utf8PathBuf,
        /// Underlying decode failure.
        #[source]
        source: LayerError,
    },

    /// A layer file could not be read.
    #[error("failed to read layer compose file '{path}': {source}")]
    ReadLayer {
        /// Path of the layer file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A layer file could not be decoded.
    #[error("failed to parse layer compose file '{path}': {source}")]
    ParseLayer {
        /// Path of the layer file.
        path: Utf8PathBuf,
        /// Underlying decode failure.
        #[source]
        source: LayerError,
    },

    /// The merged document could not be serialised.
    #[error("failed to marshal compose file: {0}")]
    Serialize(#[source] serde_yaml::Error),
}
