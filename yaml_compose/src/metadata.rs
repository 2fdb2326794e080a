//! Decoding of the optional metadata document that leads a layer file.
//!
//! ```yaml
//! merge:
//!   defaults: { map: deep, list: append }
//!   paths:
//!     app.servers: { list: prepend }
//! ```
//!
//! Path entries inherit from the layer's resolved `defaults`, not from the
//! system default, so a path that names only `map` keeps the layer's `list`
//! choice.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, de};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::dot_path::{self, PathSyntaxError};
use crate::strategy::{MergeStrategy, StrategyNameError, StrategyTable};

const KNOWN_MERGE_KEYS: [&str; 2] = ["defaults", "paths"];

/// Failures raised while turning layer metadata into a [`StrategyTable`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetadataError {
    /// The metadata document does not have the expected shape.
    #[error("failed to decode metadata document: {0}")]
    Decode(#[source] serde_json::Error),

    /// `merge.defaults` names an unknown strategy.
    #[error("invalid merge.defaults: {0}")]
    Defaults(#[source] StrategyNameError),

    /// A `merge.paths` key is not a valid dot-path.
    #[error("invalid merge.paths.'{key}': {source}")]
    PathSyntax {
        /// The offending key as written.
        key: String,
        /// Why the key failed to parse.
        #[source]
        source: PathSyntaxError,
    },

    /// A `merge.paths` entry names an unknown strategy.
    #[error("invalid merge.paths.'{key}': {source}")]
    PathStrategy {
        /// The key whose entry was rejected.
        key: String,
        /// The unknown strategy token.
        #[source]
        source: StrategyNameError,
    },
}

#[derive(Debug, Default, Deserialize)]
struct LayerMetadata {
    #[serde(default)]
    merge: Option<MergeMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct MergeMetadata {
    #[serde(default, deserialize_with = "strategy_entry")]
    defaults: Option<StrategyOverride>,
    #[serde(default)]
    paths: Option<BTreeMap<String, PathEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct PathEntry(#[serde(deserialize_with = "strategy_entry")] Option<StrategyOverride>);

#[derive(Debug, Default, Deserialize)]
struct StrategyOverride {
    #[serde(default)]
    map: Option<String>,
    #[serde(default)]
    list: Option<String>,
}

impl StrategyOverride {
    /// Overlay the fields that are present onto `base`.
    fn apply(&self, base: MergeStrategy) -> Result<MergeStrategy, StrategyNameError> {
        let mut strategy = base;
        if let Some(map) = non_empty(self.map.as_deref()) {
            strategy.map = map.parse()?;
        }
        if let Some(list) = non_empty(self.list.as_deref()) {
            strategy.list = list.parse()?;
        }
        Ok(strategy)
    }
}

/// Accept only a mapping or `null` where a strategy entry is expected.
///
/// The derived decoder alone also takes a sequence of field values, reading
/// `defaults: [deep]` as `map: deep`.
fn strategy_entry<'de, D>(deserializer: D) -> Result<Option<StrategyOverride>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer)?
        .map(|entry| {
            StrategyOverride::deserialize(Value::Object(entry)).map_err(de::Error::custom)
        })
        .transpose()
}

fn non_empty(token: Option<&str>) -> Option<&str> {
    token.filter(|value| !value.is_empty())
}

/// Build the strategy table described by a layer's metadata document.
///
/// Keys other than `merge` are ignored, as are unknown keys beneath `merge`
/// (these are logged). The metadata itself never reaches the merged output.
///
/// # Errors
///
/// Returns a [`MetadataError`] when the document has the wrong shape, a path
/// key is malformed, or a strategy token is unknown.
pub fn decode(document: Map<String, Value>) -> Result<StrategyTable, MetadataError> {
    warn_unknown_merge_keys(&document);
    let metadata: LayerMetadata =
        serde_json::from_value(Value::Object(document)).map_err(MetadataError::Decode)?;
    let merge = metadata.merge.unwrap_or_default();

    let defaults = merge
        .defaults
        .unwrap_or_default()
        .apply(MergeStrategy::default())
        .map_err(MetadataError::Defaults)?;
    let mut table = StrategyTable::new(defaults);

    for (key, entry) in merge.paths.unwrap_or_default() {
        let normalized = match dot_path::normalize_text(&key) {
            Ok(normalized) => normalized,
            Err(source) => return Err(MetadataError::PathSyntax { key, source }),
        };
        let strategy = match entry.0.unwrap_or_default().apply(defaults) {
            Ok(strategy) => strategy,
            Err(source) => return Err(MetadataError::PathStrategy { key, source }),
        };
        table.insert_normalized(normalized, strategy);
    }

    Ok(table)
}

fn warn_unknown_merge_keys(document: &Map<String, Value>) {
    let Some(Value::Object(merge)) = document.get("merge") else {
        return;
    };
    for key in merge.keys() {
        if !KNOWN_MERGE_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "ignoring unknown key under merge metadata");
        }
    }
}
