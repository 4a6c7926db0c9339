//! Inline attribute conversion.
//!
//! Converts the inline markup inside one accumulated text buffer into
//! backend marker strings: `*`/`_`/`` ` `` font emphasis and
//! `link:target[text]`-style hyperlink anchors. The backend escapes the
//! raw text first, then the scan replaces markup with the markers the
//! backend hands back.

use rendoc_renderers_core::{Emphasis, Renderer};

/// A recognized hyperlink anchor.
struct Anchor {
    /// Index just past the closing `]`.
    end: usize,
    /// Characters of already-emitted output belonging to the target.
    back: usize,
    target: String,
    text: String,
}

fn emphasis_kind(c: char) -> Option<Emphasis> {
    match c {
        '*' => Some(Emphasis::Bold),
        '_' => Some(Emphasis::Italic),
        '`' => Some(Emphasis::Code),
        _ => None,
    }
}

/// True if the characters ending at `chars[i]` (exclusive) spell `pattern`.
fn tail_is(chars: &[char], i: usize, pattern: &str) -> bool {
    let n = pattern.chars().count();
    i >= n && chars[i - n..i].iter().copied().eq(pattern.chars())
}

/// Check for a `link:target[text]` hyperlink anchor at the `:` in
/// `chars[i]`.
///
/// Anchors are of the form `<scheme> ':' <target> '[' <text> ']'` where
/// the scheme is one of `ftp`, `http`, `https`, `mailto` or `link`, the
/// text may nest brackets, and the bracket segment is required — without
/// a matching closing bracket the `:` stays literal. For the `link`
/// scheme the scheme itself is not part of the target.
fn detect_anchor(chars: &[char], i: usize) -> Option<Anchor> {
    let (back, target_beg) = if tail_is(chars, i, "ftp") {
        (3, i - 3)
    } else if tail_is(chars, i, "http") {
        (4, i - 4)
    } else if tail_is(chars, i, "link") {
        (4, i + 1)
    } else if tail_is(chars, i, "https") {
        (5, i - 5)
    } else if tail_is(chars, i, "mailto") {
        (6, i - 6)
    } else {
        return None;
    };
    let mut text_beg = 0;
    let mut text_end = 0;
    let mut nesting = 0i32;
    let mut j = i;
    while j < chars.len() {
        if chars[j] == '[' {
            if text_beg == 0 {
                text_beg = j + 1;
            }
            nesting += 1;
        }
        if chars[j] == ']' {
            nesting -= 1;
            if nesting == 0 {
                text_end = j;
                break;
            }
            if nesting < 0 {
                break;
            }
        }
        j += 1;
    }
    if text_end == 0 {
        return None;
    }
    Some(Anchor {
        end: text_end + 1,
        back,
        target: chars[target_beg..text_beg - 1].iter().collect(),
        text: chars[text_beg..text_end].iter().collect(),
    })
}

/// Convert inline markup in `buf` to backend markers.
///
/// Returns the converted text with everything else untouched. Runs once
/// per buffer drain and is never re-entered on its own output.
pub(crate) fn convert_attributes<R: Renderer + ?Sized>(renderer: &mut R, buf: &str) -> String {
    let escaped = renderer.escape(buf);
    let chars: Vec<char> = escaped.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == ':' {
            if let Some(anchor) = detect_anchor(&chars, i) {
                // The target's prefix is already in the output; pull it
                // back so the link marker replaces it whole.
                out.truncate(out.len().saturating_sub(anchor.back));
                out.extend(renderer.link(&anchor.target, &anchor.text).chars());
                i = anchor.end;
                continue;
            }
        } else if let Some(kind) = emphasis_kind(c) {
            let left = if i > 0 { chars[i - 1] } else { ' ' };
            let right = if i + 1 < chars.len() { chars[i + 1] } else { ' ' };
            if right == c {
                // A doubled marker consumes both characters and toggles
                // the escalated variant.
                out.extend(renderer.font(kind.escalated()).chars());
                i += 2;
                continue;
            }
            // '*' flanked like a glob in a path example stays literal,
            // as does any marker embedded in an identifier.
            let literal_glob = c == '*'
                && matches!(left, ' ' | '/')
                && matches!(right, ' ' | '.' | '/')
                || matches!(left, ' ' | '/') && matches!(right, ' ' | '.');
            let literal_identifier = left.is_alphanumeric() && right.is_alphanumeric();
            if !literal_glob && !literal_identifier {
                out.extend(renderer.font(kind).chars());
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out.into_iter().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rendoc_renderers_dev::{Call, RecordingRenderer};

    use super::*;

    fn convert(input: &str) -> (String, Vec<Call>) {
        let mut renderer = RecordingRenderer::new();
        let out = convert_attributes(&mut renderer, input);
        (out, renderer.into_calls())
    }

    #[test]
    fn test_plain_text_untouched() {
        let (out, calls) = convert("plain prose, no markup.");
        assert_eq!(out, "plain prose, no markup.");
        assert_eq!(calls, vec![]);
    }

    #[test]
    fn test_bold_toggles_twice() {
        let (out, calls) = convert("*bold*");
        assert_eq!(out, "<B>bold<B>");
        assert_eq!(calls, vec![Call::Font(Emphasis::Bold), Call::Font(Emphasis::Bold)]);
    }

    #[test]
    fn test_glob_star_stays_literal() {
        let (out, calls) = convert("the glob * matches all");
        assert_eq!(out, "the glob * matches all");
        assert_eq!(calls, vec![]);
    }

    #[test]
    fn test_path_glob_stays_literal() {
        let (_, calls) = convert("copy gs://bucket/*.txt somewhere");
        assert!(!calls.iter().any(|c| matches!(c, Call::Font(_))));
    }

    #[test]
    fn test_identifier_underscore_stays_literal() {
        let (out, calls) = convert("set foo_bar here");
        assert_eq!(out, "set foo_bar here");
        assert_eq!(calls, vec![]);
    }

    #[test]
    fn test_underscore_italic() {
        let (out, _) = convert("an _emphasized_ word");
        assert_eq!(out, "an <I>emphasized<I> word");
    }

    #[test]
    fn test_code_span() {
        let (out, _) = convert("run `ls` now");
        assert_eq!(out, "run <C>ls<C> now");
    }

    #[test]
    fn test_doubled_marker_escalates() {
        let (out, calls) = convert("__really__");
        assert_eq!(out, "<B>really<B>");
        assert_eq!(calls, vec![Call::Font(Emphasis::Bold), Call::Font(Emphasis::Bold)]);
    }

    #[rstest::rstest]
    #[case("see http://example.com[the site] now", "http://example.com", "the site")]
    #[case("see https://example.com[] now", "https://example.com", "")]
    #[case("ftp://host/file[grab it]", "ftp://host/file", "grab it")]
    #[case("mailto:a@b.c[mail me]", "mailto:a@b.c", "mail me")]
    fn test_anchor_schemes(#[case] input: &str, #[case] target: &str, #[case] text: &str) {
        let (_, calls) = convert(input);
        assert_eq!(
            calls,
            vec![Call::Link {
                target: target.to_string(),
                text: text.to_string(),
            }]
        );
    }

    #[test]
    fn test_anchor_replaces_emitted_prefix() {
        let (out, _) = convert("see http://example.com[the site] now");
        assert_eq!(out, "see <LINK:http://example.com[the site]> now");
    }

    #[test]
    fn test_link_scheme_strips_prefix() {
        let (_, calls) = convert("link:gcloud/reference[gcloud reference]");
        assert_eq!(
            calls,
            vec![Call::Link {
                target: "gcloud/reference".to_string(),
                text: "gcloud reference".to_string(),
            }]
        );
    }

    #[test]
    fn test_anchor_nested_brackets() {
        let (_, calls) = convert("http://example.com[text [with] nesting]");
        assert_eq!(
            calls,
            vec![Call::Link {
                target: "http://example.com".to_string(),
                text: "text [with] nesting".to_string(),
            }]
        );
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let (out, calls) = convert("http://example.com[broken");
        assert_eq!(out, "http://example.com[broken");
        assert_eq!(calls, vec![]);
    }

    #[test]
    fn test_bare_colon_is_literal() {
        let (out, calls) = convert("note: nothing here");
        assert_eq!(out, "note: nothing here");
        assert_eq!(calls, vec![]);
    }
}
