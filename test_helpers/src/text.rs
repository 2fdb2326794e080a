//! Shared text normalisation helpers for output assertions.

/// Converts CRLF line endings to LF.
#[must_use]
pub fn normalise_newlines(value: &str) -> String {
    value.replace("\r\n", "\n")
}

/// Normalises line endings and trims trailing whitespace from every line and
/// from the end of the text.
#[must_use]
pub fn normalise_output(value: &str) -> String {
    normalise_newlines(value)
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_owned()
}
