//! Sub-tree extraction applied to each layer before it is merged.

use serde_json::{Map, Value};

/// Select the value at `path` in `layer` and rewrap it at the same position.
///
/// The result is `{ path[0]: { path[1]: { ... { path[n-1]: value } } } }`, so a
/// later deep merge lands the value where it came from while every sibling of
/// the path is dropped. An empty path returns `layer` untouched.
///
/// Returns `None` when a key along the path is missing or an intermediate
/// value is not a mapping; callers skip such layers.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Value, json};
/// use yaml_compose::extract::extract;
///
/// let Value::Object(layer) = json!({ "noise": 1, "app": { "db": { "host": "x" }, "web": {} } })
/// else {
///     unreachable!()
/// };
/// let extracted = extract(layer, &["app".to_owned(), "db".to_owned()]);
/// assert_eq!(
///     extracted.map(Value::Object),
///     Some(json!({ "app": { "db": { "host": "x" } } }))
/// );
/// ```
#[must_use]
pub fn extract(layer: Map<String, Value>, path: &[String]) -> Option<Map<String, Value>> {
    if path.is_empty() {
        return Some(layer);
    }

    let mut current = Value::Object(layer);
    for segment in path {
        let Value::Object(mut map) = current else {
            return None;
        };
        current = map.remove(segment)?;
    }

    for segment in path.iter().rev() {
        let mut wrapper = Map::new();
        wrapper.insert(segment.clone(), current);
        current = Value::Object(wrapper);
    }

    match current {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
