//! Splitting layer and base files into their YAML documents.
//!
//! A layer file holds up to two non-empty documents: an optional metadata
//! document followed by the data mapping. Documents without content are
//! ignored before counting; an explicit `null` document still counts and
//! decodes as the empty mapping.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::metadata::{self, MetadataError};
use crate::strategy::StrategyTable;
use crate::yaml;

/// Failures raised while decoding the contents of a base or layer file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LayerError {
    /// The file is not valid UTF-8.
    #[error("file is not valid UTF-8: {0}")]
    Utf8(#[source] std::str::Utf8Error),

    /// The YAML parser rejected the input.
    #[error("{0}")]
    Yaml(#[source] serde_yaml::Error),

    /// The layer holds more than a metadata and a data document.
    #[error("expected at most two YAML documents (metadata and data), got {0}")]
    TooManyDocuments(usize),

    /// A kept document is not a mapping.
    #[error("expected YAML mapping document, got {0}")]
    NotMapping(&'static str),

    /// The metadata document could not be turned into a strategy table.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// A decoded layer: its data mapping and the strategies to merge it with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerDocument {
    /// Strategies from the metadata document, or the system default.
    pub strategy: StrategyTable,
    /// The data mapping to fold into the accumulator.
    pub data: Map<String, Value>,
}

/// Decode `bytes` into its non-empty documents, each as a mapping.
///
/// A `null` document becomes the empty mapping.
///
/// # Errors
///
/// Returns a [`LayerError`] when the input is not UTF-8, is not valid YAML,
/// or holds a document whose top level is not a mapping.
pub fn split(bytes: &[u8]) -> Result<Vec<Map<String, Value>>, LayerError> {
    let text = std::str::from_utf8(bytes).map_err(LayerError::Utf8)?;
    yaml::decode_documents(text)
        .map_err(LayerError::Yaml)?
        .into_iter()
        .map(into_mapping)
        .collect()
}

/// Decode a layer file into its data mapping and strategy table.
///
/// # Errors
///
/// Returns a [`LayerError`] when splitting fails, when more than two
/// documents are present, or when the metadata document is invalid.
pub fn parse_layer(bytes: &[u8]) -> Result<LayerDocument, LayerError> {
    let mut documents = split(bytes)?.into_iter();
    match (documents.next(), documents.next(), documents.len()) {
        (None, _, _) => Ok(LayerDocument::default()),
        (Some(data), None, _) => Ok(LayerDocument {
            strategy: StrategyTable::default(),
            data,
        }),
        (Some(meta), Some(data), 0) => Ok(LayerDocument {
            strategy: metadata::decode(meta)?,
            data,
        }),
        (Some(_), Some(_), rest) => Err(LayerError::TooManyDocuments(rest + 2)),
    }
}

/// Decode the base file into a mapping.
///
/// The first non-empty document is used; an empty file is the empty mapping.
///
/// # Errors
///
/// Returns a [`LayerError`] when the input cannot be decoded as YAML or its
/// top level is not a mapping.
pub fn parse_base(bytes: &[u8]) -> Result<Map<String, Value>, LayerError> {
    Ok(split(bytes)?.into_iter().next().unwrap_or_default())
}

fn into_mapping(document: Value) -> Result<Map<String, Value>, LayerError> {
    match document {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(LayerError::NotMapping(yaml::type_name(&other))),
    }
}
