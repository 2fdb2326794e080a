//! Locating the base file and the layer files stored beside it.

use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::CliError;

const LAYER_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

/// The layer directory for `base`: the base path with `.d` appended.
#[must_use]
pub fn layer_dir(base: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{base}.d"))
}

/// Whether `name` carries one of the layer file extensions.
#[must_use]
pub fn is_layer_file_name(name: &str) -> bool {
    LAYER_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Ensures the base file exists.
///
/// # Errors
///
/// Returns [`CliError::BaseNotFound`] when nothing exists at `base`, or
/// [`CliError::CheckBase`] when the path cannot be inspected.
pub fn check_base(base: &Utf8Path) -> Result<(), CliError> {
    match base.metadata() {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(CliError::BaseNotFound(base.to_path_buf()))
        }
        Err(err) => Err(CliError::CheckBase {
            path: base.to_path_buf(),
            source: err,
        }),
    }
}

/// Ensures the layer directory exists and is a directory.
///
/// # Errors
///
/// Returns [`CliError::LayerDirNotFound`], [`CliError::LayerDirNotDirectory`]
/// or [`CliError::CheckLayerDir`].
pub fn check_layer_dir(dir: &Utf8Path) -> Result<(), CliError> {
    match dir.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CliError::LayerDirNotDirectory(dir.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(CliError::LayerDirNotFound(dir.to_path_buf()))
        }
        Err(err) => Err(CliError::CheckLayerDir {
            path: dir.to_path_buf(),
            source: err,
        }),
    }
}

/// Lists the layer file names in `dir`, in directory listing order.
///
/// Only entries ending in `.yaml` or `.yml` are kept; subdirectories are
/// ignored even when their names match.
///
/// # Errors
///
/// Returns [`CliError::ReadLayerDir`] when the directory cannot be opened or
/// an entry cannot be inspected.
pub fn list_layers(dir: &Utf8Path) -> Result<Vec<String>, CliError> {
    let read_err = |source| CliError::ReadLayerDir {
        path: dir.to_path_buf(),
        source,
    };
    let handle = Dir::open_ambient_dir(dir, ambient_authority()).map_err(read_err)?;

    let mut layers = Vec::new();
    for entry_result in handle.entries().map_err(read_err)? {
        let entry = entry_result.map_err(read_err)?;
        let file_name = entry.file_name().map_err(read_err)?;
        if !is_layer_file_name(&file_name) {
            continue;
        }
        if entry.file_type().map_err(read_err)?.is_dir() {
            tracing::debug!(entry = %file_name, "skipping directory in layer directory");
            continue;
        }
        layers.push(file_name);
    }
    Ok(layers)
}

/// Runs the base and directory checks and returns the layer names for `base`.
///
/// # Errors
///
/// Propagates the first failing check.
pub fn discover(base: &Utf8Path) -> Result<Vec<String>, CliError> {
    check_base(base)?;
    let dir = layer_dir(base);
    check_layer_dir(&dir)?;
    let layers = list_layers(&dir)?;
    tracing::debug!(dir = %dir, count = layers.len(), "discovered layers");
    Ok(layers)
}
