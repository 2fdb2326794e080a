//! Layered YAML composition.
//!
//! A composition starts from a base YAML file and folds in the layer files
//! found in the sibling `<base>.d/` directory. Layers are named
//! `<order>-<name>.yaml` and applied in ascending order. Each layer may lead
//! with a metadata document selecting how mappings and sequences merge, either
//! for the whole layer or for individual dot-paths:
//!
//! ```yaml
//! merge:
//!   defaults: { list: append }
//!   paths:
//!     app.servers: { map: override }
//! ---
//! app:
//!   servers: { primary: db-1 }
//! ```
//!
//! [`Composer`] drives a run; the building blocks are public so other tools
//! can reuse the merge semantics on their own value trees.

pub mod composer;
pub mod document;
pub mod dot_path;
mod error;
pub mod extract;
pub mod fs;
pub mod layer_name;
pub mod merge;
pub mod metadata;
pub mod strategy;
mod yaml;

pub use composer::Composer;
pub use document::{LayerDocument, LayerError};
pub use dot_path::PathSyntaxError;
pub use error::{ComposeError, ComposeResult};
pub use fs::{AmbientFs, ComposeFs, MemoryFs};
pub use layer_name::LayerNameError;
pub use metadata::MetadataError;
pub use strategy::{ListStrategy, MapStrategy, MergeStrategy, StrategyNameError, StrategyTable};
