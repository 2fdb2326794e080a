//! Orchestration of a full composition: validate, sort, read, fold, emit.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::{self, LayerDocument};
use crate::error::{ComposeError, ComposeResult};
use crate::fs::{AmbientFs, ComposeFs};
use crate::strategy::StrategyTable;
use crate::{dot_path, extract, layer_name, merge, yaml};

/// Composes a base YAML file with the layers stored in `<base>.d/`.
///
/// A composer is single use: [`Composer::run`] and [`Composer::compose`]
/// consume it, and the layer list is sorted in place while running.
///
/// ```rust
/// use yaml_compose::{Composer, MemoryFs};
///
/// let fs = MemoryFs::new()
///     .with_file("base.yaml", "doe: a deer\nxmas: true\n")
///     .with_file("base.yaml.d/1-c.yaml", "xmas: false\n");
/// let output = Composer::with_fs("base.yaml", ["1-c.yaml"], fs).run()?;
/// assert!(output.contains("xmas: false"));
/// # Ok::<_, yaml_compose::ComposeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Composer<F = AmbientFs> {
    base: Utf8PathBuf,
    layers: Vec<String>,
    extract_layer_path: String,
    fs: F,
}

impl Composer<AmbientFs> {
    /// Create a composer reading from the host filesystem.
    #[must_use]
    pub fn new<B, I, S>(base: B, layers: I) -> Self
    where
        B: Into<Utf8PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_fs(base, layers, AmbientFs)
    }
}

impl<F: ComposeFs> Composer<F> {
    /// Create a composer reading through `fs`.
    #[must_use]
    pub fn with_fs<B, I, S>(base: B, layers: I, fs: F) -> Self
    where
        B: Into<Utf8PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.into(),
            layers: layers.into_iter().map(Into::into).collect(),
            extract_layer_path: String::new(),
            fs,
        }
    }

    /// Restrict every layer to the sub-tree at `path` before merging.
    ///
    /// An empty path disables extraction. Layers that do not contain the path
    /// contribute nothing.
    #[must_use]
    pub fn extract_layer_path(mut self, path: impl Into<String>) -> Self {
        self.extract_layer_path = path.into();
        self
    }

    /// Path of the base file.
    #[must_use]
    pub fn base(&self) -> &Utf8Path {
        &self.base
    }

    /// Layer file names in their current order.
    #[must_use]
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Location of `layer` inside the base file's layer directory.
    #[must_use]
    pub fn layer_path(&self, layer: &str) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.d/{layer}", self.base))
    }

    /// Run the composition and return the merged document as YAML text.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError`] for the first failure encountered; see
    /// [`Composer::compose`]. Serialisation failures are reported as
    /// [`ComposeError::Serialize`].
    pub fn run(self) -> ComposeResult<String> {
        let document = self.compose()?;
        emit(&document)
    }

    /// Run the composition and return the merged mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError`] when a layer name is invalid, the extract
    /// path is malformed, or the base or a layer cannot be read or decoded.
    pub fn compose(mut self) -> ComposeResult<Map<String, Value>> {
        for layer in &self.layers {
            layer_name::validate(layer)?;
        }
        let extract_segments = self.parse_extract_path()?;

        layer_name::sort(&mut self.layers);
        tracing::debug!(base = %self.base, layers = ?self.layers, "composing layers");

        let bytes = self
            .fs
            .read_file(&self.base)
            .map_err(|source| ComposeError::ReadBase {
                path: self.base.clone(),
                source,
            })?;
        let mut accumulator =
            document::parse_base(&bytes).map_err(|source| ComposeError::ParseBase {
                path: self.base.clone(),
                source,
            })?;

        for layer in &self.layers {
            let Some((data, strategy)) = self.load_layer(layer, extract_segments.as_deref())?
            else {
                continue;
            };
            tracing::debug!(
                layer = %layer,
                path_overrides = strategy.path_count(),
                "merging layer"
            );
            accumulator = merge::merge_map(accumulator, data, &strategy, &[]);
        }

        Ok(accumulator)
    }

    fn parse_extract_path(&self) -> ComposeResult<Option<Vec<String>>> {
        if self.extract_layer_path.is_empty() {
            return Ok(None);
        }
        dot_path::parse(&self.extract_layer_path)
            .map(Some)
            .map_err(|source| ComposeError::ExtractPath {
                path: self.extract_layer_path.clone(),
                source,
            })
    }

    /// Read and decode `layer`, applying extraction when configured.
    ///
    /// Returns `None` when the layer lacks the extract path.
    fn load_layer(
        &self,
        layer: &str,
        extract_segments: Option<&[String]>,
    ) -> ComposeResult<Option<(Map<String, Value>, StrategyTable)>> {
        let path = self.layer_path(layer);
        let bytes = self
            .fs
            .read_file(&path)
            .map_err(|source| ComposeError::ReadLayer {
                path: path.clone(),
                source,
            })?;
        let LayerDocument { strategy, data } =
            document::parse_layer(&bytes).map_err(|source| ComposeError::ParseLayer {
                path: path.clone(),
                source,
            })?;

        let Some(segments) = extract_segments else {
            return Ok(Some((data, strategy)));
        };
        match extract::extract(data, segments) {
            Some(extracted) => Ok(Some((extracted, strategy))),
            None => {
                tracing::debug!(
                    layer = %layer,
                    extract_path = %self.extract_layer_path,
                    "layer does not contain the extract path; skipping"
                );
                Ok(None)
            }
        }
    }
}

fn emit<T: Serialize + ?Sized>(document: &T) -> ComposeResult<String> {
    yaml::encode(document).map_err(ComposeError::Serialize)
}
