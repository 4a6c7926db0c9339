//! CSV row parsing shared by table-drawing backends.
//!
//! Table blocks carry their rows as CSV lines; backends that draw
//! tables (text, HTML) split them into cells here.

/// Split one CSV table row into its cells.
///
/// Quoted cells may contain commas. A row that fails to parse as CSV is
/// kept whole as a single cell rather than dropped.
#[must_use]
pub fn split_row(row: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(row.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        Some(Err(e)) => {
            tracing::warn!(%row, ?e, "Malformed CSV table row, keeping it whole");
            vec![row.to_string()]
        }
        None => vec![row.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_row_simple() {
        assert_eq!(split_row("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_row_quoted_comma() {
        assert_eq!(
            split_row(r#"one,"two, with comma",three"#),
            vec!["one", "two, with comma", "three"]
        );
    }

    #[test]
    fn test_split_row_empty_cells() {
        assert_eq!(split_row("a,,c"), vec!["a", "", "c"]);
    }
}
