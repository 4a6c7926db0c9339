//! Output normalization utilities for test comparisons.

/// Normalize rendered output for comparison.
///
/// Strips trailing whitespace from every line so incidental padding
/// differences do not fail assertions.
///
/// # Example
///
/// ```
/// use rendoc_renderers_dev::output::remove_lines_trailing_whitespace;
///
/// let input = "line1   \nline2\t\nline3";
/// assert_eq!(remove_lines_trailing_whitespace(input), "line1\nline2\nline3");
/// ```
#[must_use]
pub fn remove_lines_trailing_whitespace(output: &str) -> String {
    output
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
