//! Recursive merging of value trees under a [`StrategyTable`].
//!
//! Behaviour:
//! - Keys only in the base survive unchanged; keys only in the layer are
//!   inserted.
//! - Two mappings meeting at a path are merged key by key (`deep`) or replaced
//!   by the layer (`override`).
//! - Two sequences meeting at a path are replaced, appended to, or prepended
//!   to according to the list strategy resolved for that path.
//! - Anything else, including a layer `null`, replaces the base value.
//!
//! The merge is not commutative: the layer wins every conflict the strategy
//! leaves to it.

use serde_json::{Map, Value};

use crate::strategy::{ListStrategy, MapStrategy, StrategyTable};

/// Fold `layer` into `base` and return the merged mapping.
///
/// `path` holds the keys leading from the document root to `base`; it is only
/// used to resolve path-scoped strategies.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Map, Value, json};
/// use yaml_compose::StrategyTable;
/// use yaml_compose::merge::merge_map;
///
/// let Value::Object(base) = json!({ "a": 1, "b": { "x": 1 } }) else { unreachable!() };
/// let Value::Object(layer) = json!({ "b": { "y": 2 }, "c": 3 }) else { unreachable!() };
/// let merged = merge_map(base, layer, &StrategyTable::default(), &[]);
/// assert_eq!(
///     Value::Object(merged),
///     json!({ "a": 1, "b": { "x": 1, "y": 2 }, "c": 3 })
/// );
/// ```
#[must_use]
pub fn merge_map(
    mut base: Map<String, Value>,
    layer: Map<String, Value>,
    strategy: &StrategyTable,
    path: &[&str],
) -> Map<String, Value> {
    for (key, incoming) in layer {
        match base.get_mut(&key) {
            Some(existing) => {
                let mut next = Vec::with_capacity(path.len() + 1);
                next.extend_from_slice(path);
                next.push(key.as_str());
                let current = std::mem::take(existing);
                *existing = merge_value(current, incoming, strategy, &next);
            }
            None => {
                base.insert(key, incoming);
            }
        }
    }
    base
}

/// Merge two values found at `path`.
#[must_use]
pub fn merge_value(base: Value, layer: Value, strategy: &StrategyTable, path: &[&str]) -> Value {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => match strategy.resolve(path).map {
            MapStrategy::Override => Value::Object(layer_map),
            MapStrategy::Deep => Value::Object(merge_map(base_map, layer_map, strategy, path)),
        },
        (Value::Array(mut base_list), Value::Array(mut layer_list)) => {
            match strategy.resolve(path).list {
                ListStrategy::Override => Value::Array(layer_list),
                ListStrategy::Append => {
                    base_list.append(&mut layer_list);
                    Value::Array(base_list)
                }
                ListStrategy::Prepend => {
                    layer_list.append(&mut base_list);
                    Value::Array(layer_list)
                }
            }
        }
        (_, layer) => layer,
    }
}

/// Fold `layer` into a document root that may not be a mapping yet.
///
/// A `null` or otherwise non-mapping `base` is treated as the empty mapping.
#[must_use]
pub fn merge_document(
    base: Value,
    layer: Map<String, Value>,
    strategy: &StrategyTable,
) -> Map<String, Value> {
    let base = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merge_map(base, layer, strategy, &[])
}
