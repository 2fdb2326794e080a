//! Merge strategies and per-layer strategy tables.
//!
//! Each layer merges under a [`StrategyTable`]: a default [`MergeStrategy`]
//! plus overrides keyed by normalised dot-path. Paths match exactly; there is
//! no prefix or wildcard matching.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::dot_path;

/// How two mappings meeting at the same path are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MapStrategy {
    /// Merge the layer mapping into the base mapping key by key.
    #[default]
    Deep,
    /// Replace the base mapping with the layer mapping.
    Override,
}

/// How two sequences meeting at the same path are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ListStrategy {
    /// Replace the base sequence with the layer sequence.
    #[default]
    Override,
    /// Concatenate the layer sequence after the base sequence.
    Append,
    /// Concatenate the layer sequence before the base sequence.
    Prepend,
}

/// An unknown strategy token found in layer metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {kind} strategy '{value}'")]
pub struct StrategyNameError {
    kind: &'static str,
    value: String,
}

impl StrategyNameError {
    /// The strategy family the token was parsed for (`map` or `list`).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl MapStrategy {
    /// Returns the metadata token for this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deep => "deep",
            Self::Override => "override",
        }
    }
}

impl ListStrategy {
    /// Returns the metadata token for this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Append => "append",
            Self::Prepend => "prepend",
        }
    }
}

impl FromStr for MapStrategy {
    type Err = StrategyNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deep" => Ok(Self::Deep),
            "override" => Ok(Self::Override),
            other => Err(StrategyNameError {
                kind: "map",
                value: other.to_owned(),
            }),
        }
    }
}

impl FromStr for ListStrategy {
    type Err = StrategyNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "override" => Ok(Self::Override),
            "append" => Ok(Self::Append),
            "prepend" => Ok(Self::Prepend),
            other => Err(StrategyNameError {
                kind: "list",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for MapStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ListStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of strategies applied at one path.
///
/// The default is a deep map merge with list replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MergeStrategy {
    /// Strategy for mapping conflicts.
    pub map: MapStrategy,
    /// Strategy for sequence conflicts.
    pub list: ListStrategy,
}

impl MergeStrategy {
    /// Build a strategy from its two halves.
    #[must_use]
    pub const fn new(map: MapStrategy, list: ListStrategy) -> Self {
        Self { map, list }
    }
}

/// Strategies in force while a single layer is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyTable {
    defaults: MergeStrategy,
    paths: HashMap<String, MergeStrategy>,
}

impl StrategyTable {
    /// Create a table that applies `defaults` everywhere.
    #[must_use]
    pub fn new(defaults: MergeStrategy) -> Self {
        Self {
            defaults,
            paths: HashMap::new(),
        }
    }

    /// The strategy used where no path override matches.
    #[must_use]
    pub const fn defaults(&self) -> MergeStrategy {
        self.defaults
    }

    /// Register `strategy` for the already-normalised `path`.
    pub fn insert_normalized(&mut self, path: String, strategy: MergeStrategy) {
        self.paths.insert(path, strategy);
    }

    /// Register `strategy` for `segments`, normalising them first.
    #[must_use]
    pub fn with_path<S: AsRef<str>>(mut self, segments: &[S], strategy: MergeStrategy) -> Self {
        self.insert_normalized(dot_path::normalize(segments), strategy);
        self
    }

    /// Number of path overrides registered.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Resolve the strategy for the key sequence `path`.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> MergeStrategy {
        if self.paths.is_empty() {
            return self.defaults;
        }
        self.paths
            .get(&dot_path::normalize(path))
            .copied()
            .unwrap_or(self.defaults)
    }
}
