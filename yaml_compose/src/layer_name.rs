//! Layer file naming rules.
//!
//! Layer files are named `<order>-<name>.yaml`, where the order prefix is a
//! decimal integer. Layers are applied by ascending order prefix and then by
//! the remainder of the name.

use std::cmp::Ordering;

use thiserror::Error;

/// A layer file name that does not follow the `<order>-<name>` convention.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LayerNameError {
    /// The name has no `-` separator or nothing before it.
    #[error("invalid layer file name '{0}': expected <order>-<name>.yaml")]
    MissingOrder(String),
    /// The text before the first `-` is not a decimal integer.
    #[error("invalid layer file name '{0}': expected numeric order prefix")]
    NonNumericOrder(String),
}

/// Split `name` at its first `-` into the order prefix and the remainder.
///
/// A name without a `-` is returned whole with an empty remainder.
#[must_use]
pub fn split(name: &str) -> (&str, &str) {
    name.split_once('-').unwrap_or((name, ""))
}

/// Check that `name` carries a numeric order prefix.
///
/// # Errors
///
/// Returns a [`LayerNameError`] when the separator or prefix is missing, or
/// when the prefix is not a decimal integer.
pub fn validate(name: &str) -> Result<(), LayerNameError> {
    let Some((prefix, _)) = name.split_once('-') else {
        return Err(LayerNameError::MissingOrder(name.to_owned()));
    };
    if prefix.is_empty() {
        return Err(LayerNameError::MissingOrder(name.to_owned()));
    }
    if prefix.parse::<i64>().is_err() {
        return Err(LayerNameError::NonNumericOrder(name.to_owned()));
    }
    Ok(())
}

/// Total order over layer names.
///
/// Equal prefixes compare by the remainder. Differing prefixes compare
/// numerically when both parse as integers and lexicographically otherwise,
/// so unvalidated input never panics.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    let (a_prefix, a_name) = split(a);
    let (b_prefix, b_name) = split(b);
    if a_prefix == b_prefix {
        return a_name.cmp(b_name);
    }
    match (a_prefix.parse::<i64>(), b_prefix.parse::<i64>()) {
        (Ok(a_order), Ok(b_order)) => a_order.cmp(&b_order),
        _ => a_prefix.cmp(b_prefix),
    }
}

/// Stable-sort `layers` into application order.
pub fn sort<S: AsRef<str>>(layers: &mut [S]) {
    layers.sort_by(|a, b| compare(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::{LayerNameError, compare, sort, split, validate};
    use rstest::rstest;
    use std::cmp::Ordering;

    #[rstest]
    #[case("1-layer.yaml", ("1", "layer.yaml"))]
    #[case("10-a-b.yml", ("10", "a-b.yml"))]
    #[case("layer.yaml", ("layer.yaml", ""))]
    #[case("-x.yaml", ("", "x.yaml"))]
    fn split_cuts_at_first_dash(#[case] name: &str, #[case] expected: (&str, &str)) {
        assert_eq!(split(name), expected);
    }

    #[rstest]
    #[case("1-a.yaml")]
    #[case("0010-a.yaml")]
    #[case("+3-signed.yaml")]
    fn validate_accepts_numeric_prefixes(#[case] name: &str) {
        assert_eq!(validate(name), Ok(()));
    }

    #[rstest]
    #[case("bad.yaml", LayerNameError::MissingOrder("bad.yaml".to_owned()))]
    #[case("-a.yaml", LayerNameError::MissingOrder("-a.yaml".to_owned()))]
    #[case("a-b.yaml", LayerNameError::NonNumericOrder("a-b.yaml".to_owned()))]
    fn validate_rejects_malformed_names(#[case] name: &str, #[case] expected: LayerNameError) {
        assert_eq!(validate(name), Err(expected));
    }

    #[test]
    fn validate_error_mentions_layer_file_name() {
        let err = validate("bad.yaml").expect_err("name without order must fail");
        assert!(err.to_string().contains("invalid layer file name"));
    }

    #[rstest]
    #[case("2-x.yaml", "10-x.yaml", Ordering::Less)]
    #[case("10-x.yaml", "2-x.yaml", Ordering::Greater)]
    #[case("1-a.yaml", "1-b.yaml", Ordering::Less)]
    #[case("1-a.yaml", "1-a.yaml", Ordering::Equal)]
    #[case("a-x.yaml", "1-x.yaml", Ordering::Greater)]
    #[case("b-x.yaml", "a-x.yaml", Ordering::Greater)]
    fn compare_orders_by_prefix_then_name(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare(a, b), expected);
    }

    #[test]
    fn sort_places_numeric_prefixes_in_numeric_order() {
        let mut layers = vec!["10-x.yaml", "2-x.yaml", "1-b.yaml", "1-a.yaml"];
        sort(&mut layers);
        assert_eq!(layers, ["1-a.yaml", "1-b.yaml", "2-x.yaml", "10-x.yaml"]);
    }

    #[test]
    fn sort_tolerates_unvalidated_names() {
        let mut layers = vec!["b.yaml", "2-x.yaml", "a-x.yaml"];
        sort(&mut layers);
        assert!(
            layers
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if compare(a, b) != Ordering::Greater))
        );
    }
}
