//! YAML codec glue backed by `serde_yaml`.
//!
//! Documents decode into [`serde_json::Value`] trees, whose object maps keep
//! insertion order, and the merged accumulator is encoded back the same way.
//!
//! A stream is cut into documents at column-zero `---` and `...` markers before
//! decoding. YAML forbids those markers inside document content, so the cut is
//! exact, and it lets a document with no content at all (blank, comments only)
//! be told apart from one holding an explicit `null`.

use serde::Serialize;
use serde_json::Value;

/// Decode every non-empty document in `text`, in stream order.
///
/// Documents made only of blank lines, comments and directives are skipped.
/// An explicit `~` or `null` document is kept as [`Value::Null`].
pub(crate) fn decode_documents(text: &str) -> Result<Vec<Value>, serde_yaml::Error> {
    raw_documents(text)
        .into_iter()
        .filter(|raw| has_content(raw))
        .map(|raw| serde_yaml::from_str(&raw))
        .collect()
}

/// Encode `document` as block-style YAML.
pub(crate) fn encode<T>(document: &T) -> Result<String, serde_yaml::Error>
where
    T: Serialize + ?Sized,
{
    serde_yaml::to_string(document)
}

/// Describe the top-level type of `value` for diagnostics.
pub(crate) const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Cut `text` into the source text of each document.
///
/// The text after a `---` marker on its own line belongs to the document it
/// opens (`--- |` starts a block scalar). The prelude before the first marker
/// is returned as its own entry and is usually empty.
fn raw_documents(text: &str) -> Vec<String> {
    let mut documents = vec![String::new()];
    for line in text.lines() {
        if let Some(rest) = marker_rest(line, "---") {
            documents.push(format!("{rest}\n"));
        } else if marker_rest(line, "...").is_some() {
            documents.push(String::new());
        } else if let Some(current) = documents.last_mut() {
            current.push_str(line);
            current.push('\n');
        }
    }
    documents
}

/// The remainder of `line` when it opens with the document `marker`.
fn marker_rest<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    match rest.chars().next() {
        None => Some(""),
        Some(' ' | '\t') => Some(rest),
        Some(_) => None,
    }
}

fn has_content(raw: &str) -> bool {
    raw.lines().any(|line| {
        let trimmed = line.trim_start();
        !(trimmed.is_empty() || trimmed.starts_with('#') || line.starts_with('%'))
    })
}
