//! Dot-path codec used to address nested mapping keys.
//!
//! A path is written as segments joined by `.`. Inside a segment `\.` stands
//! for a literal dot and `\\` for a literal backslash, so keys that contain
//! dots stay addressable. Normalising a parsed path re-encodes it with the same
//! escapes, which gives semantically equal paths a single textual key.

use thiserror::Error;

/// Syntax errors raised while parsing a dot-path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PathSyntaxError {
    /// The path text was empty.
    #[error("path cannot be empty")]
    Empty,
    /// A dot appeared with nothing before it, or the path ended on a dot.
    #[error("empty segment")]
    EmptySegment,
    /// The path ended on an unescaped backslash.
    #[error("path cannot end with an escape character")]
    TrailingEscape,
}

/// Split `text` into its segments, resolving `\` escapes.
///
/// # Errors
///
/// Returns a [`PathSyntaxError`] when `text` is empty, contains an empty
/// segment, or ends with a dangling escape.
///
/// # Examples
///
/// ```rust
/// use yaml_compose::dot_path;
///
/// let segments = dot_path::parse(r"app.db\.main.ports")?;
/// assert_eq!(segments, ["app", "db.main", "ports"]);
/// # Ok::<_, yaml_compose::PathSyntaxError>(())
/// ```
pub fn parse(text: &str) -> Result<Vec<String>, PathSyntaxError> {
    if text.is_empty() {
        return Err(PathSyntaxError::Empty);
    }

    let mut segments = Vec::new();
    let mut segment = String::new();
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            segment.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '.' => {
                if segment.is_empty() {
                    return Err(PathSyntaxError::EmptySegment);
                }
                segments.push(std::mem::take(&mut segment));
            }
            _ => segment.push(ch),
        }
    }

    if escaped {
        return Err(PathSyntaxError::TrailingEscape);
    }
    if segment.is_empty() {
        return Err(PathSyntaxError::EmptySegment);
    }
    segments.push(segment);
    Ok(segments)
}

/// Encode `segments` back into dot-path text.
///
/// The empty sequence normalises to the empty string.
///
/// # Examples
///
/// ```rust
/// use yaml_compose::dot_path;
///
/// assert_eq!(dot_path::normalize(&["app", "db.main"]), r"app.db\.main");
/// assert_eq!(dot_path::normalize::<&str>(&[]), "");
/// ```
#[must_use]
pub fn normalize<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            out.push('.');
        }
        escape_into(&mut out, segment.as_ref());
    }
    out
}

/// Parse `text` and return its normalised form.
///
/// # Errors
///
/// Propagates any [`PathSyntaxError`] raised by [`parse`].
pub fn normalize_text(text: &str) -> Result<String, PathSyntaxError> {
    parse(text).map(|segments| normalize(&segments))
}

fn escape_into(out: &mut String, segment: &str) {
    for ch in segment.chars() {
        if matches!(ch, '\\' | '.') {
            out.push('\\');
        }
        out.push(ch);
    }
}
