//! Greedy word wrapping that ignores ANSI attribute sequences.

use unicode_width::UnicodeWidthChar;

/// Display width of `s`, skipping ANSI CSI sequences.
///
/// Uses `unicode-width` so CJK characters (width 2) and zero-width
/// combining characters measure correctly.
pub(crate) fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // CSI sequence: \x1b[...letter
            if let Some('[') = chars.next() {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            width += UnicodeWidthChar::width(c).unwrap_or(0);
        }
    }
    width
}

/// Reflow `text` into lines no wider than `width` display columns.
///
/// The first line starts with `first_indent`, continuations with
/// `rest_indent`. Words never split; a word longer than the width gets a
/// line of its own.
pub(crate) fn fill_words(text: &str, width: usize, first_indent: &str, rest_indent: &str) -> String {
    let mut out = String::new();
    let mut line = String::from(first_indent);
    let mut has_word = false;
    for word in text.split_whitespace() {
        if has_word && visible_width(&line) + 1 + visible_width(word) > width {
            out.push_str(line.trim_end());
            out.push('\n');
            line = String::from(rest_indent);
            has_word = false;
        }
        if has_word {
            line.push(' ');
        }
        line.push_str(word);
        has_word = true;
    }
    if has_word {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_visible_width_skips_ansi() {
        assert_eq!(visible_width("\x1b[1mbold\x1b[22m"), 4);
    }

    #[test]
    fn test_visible_width_wide_chars() {
        assert_eq!(visible_width("漢字"), 4);
    }

    #[test]
    fn test_fill_words_wraps_at_width() {
        let filled = fill_words("one two three four", 11, "", "");
        assert_eq!(filled, "one two\nthree four\n");
    }

    #[test]
    fn test_fill_words_hanging_indent() {
        let filled = fill_words("alpha beta gamma", 12, "  - ", "    ");
        assert_eq!(filled, "  - alpha\n    beta\n    gamma\n");
    }

    #[test]
    fn test_fill_words_empty_text() {
        assert_eq!(fill_words("   ", 10, "", ""), "");
    }
}
