//! CSV table drawing for the terminal.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};

/// Draw split rows as a bordered table, indented by `indent` columns.
///
/// The first row is the header, set in bold. Cell text reflows to keep
/// the table inside `width` display columns.
pub(crate) fn layout(rows: &[Vec<String>], width: usize, indent: usize) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(u16::try_from(width.saturating_sub(indent)).unwrap_or(u16::MAX))
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    let mut remaining = rows.iter();
    if let Some(header) = remaining.next() {
        table.set_header(
            header
                .iter()
                .map(|cell| Cell::new(cell).add_attribute(Attribute::Bold)),
        );
    }
    for row in remaining {
        table.add_row(row.iter().map(Cell::new));
    }
    let margin = " ".repeat(indent);
    let mut out = String::new();
    for line in table.to_string().lines() {
        out.push_str(&margin);
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|c| (*c).to_string()).collect())
            .collect()
    }

    #[test]
    fn test_layout_draws_header_and_rows() {
        let out = layout(&rows(&[&["name", "zone"], &["a", "us-east1-b"]]), 80, 0);
        assert!(out.contains("name"), "missing header cell in {out}");
        assert!(out.contains("us-east1-b"), "missing row cell in {out}");
    }

    #[test]
    fn test_layout_indents_every_line() {
        let out = layout(&rows(&[&["x"]]), 80, 4);
        assert!(!out.is_empty());
        assert!(out.lines().all(|line| line.starts_with("    ")));
    }

    #[test]
    fn test_layout_no_rows() {
        assert_eq!(layout(&[], 80, 0), "");
    }
}
