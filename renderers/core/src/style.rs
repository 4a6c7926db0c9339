//! Output style selection.
//!
//! Defines the supported document styles and the configuration-time
//! error raised for anything outside that set.

use std::str::FromStr;

/// Output document style.
///
/// Used by backends to identify themselves and by callers for backend
/// selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// Devsite web page output.
    Devsite,
    /// HTML document output.
    Html,
    /// Unix manpage (roff/troff) output.
    Man,
    /// Markdown-to-markdown identity output.
    Markdown,
    /// Plain text output.
    #[default]
    Text,
}

impl Style {
    /// The names of every supported style, in display order.
    pub const NAMES: [&'static str; 5] = ["devsite", "html", "man", "markdown", "text"];
}

impl FromStr for Style {
    type Err = UnsupportedStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "devsite" => Ok(Self::Devsite),
            "html" => Ok(Self::Html),
            "man" => Ok(Self::Man),
            "markdown" => Ok(Self::Markdown),
            "text" => Ok(Self::Text),
            _ => Err(UnsupportedStyleError {
                style: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Devsite => write!(f, "devsite"),
            Self::Html => write!(f, "html"),
            Self::Man => write!(f, "man"),
            Self::Markdown => write!(f, "markdown"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A document style outside the supported set was requested.
///
/// This is a caller configuration error, reported before any input is
/// read; it is not a parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported document style '{style}', expected one of: devsite, html, man, markdown, text")]
pub struct UnsupportedStyleError {
    /// The rejected style name.
    pub style: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("devsite", Style::Devsite)]
    #[case("html", Style::Html)]
    #[case("HTML", Style::Html)]
    #[case("man", Style::Man)]
    #[case("markdown", Style::Markdown)]
    #[case("text", Style::Text)]
    #[case("Text", Style::Text)]
    fn test_from_str(#[case] name: &str, #[case] expected: Style) {
        assert_eq!(Style::from_str(name).unwrap(), expected);
    }

    #[test]
    fn test_from_str_unsupported() {
        let err = Style::from_str("latex").unwrap_err();
        assert_eq!(err.style, "latex");
        let message = err.to_string();
        assert!(message.contains("latex"));
        for name in Style::NAMES {
            assert!(message.contains(name), "missing {name} in {message}");
        }
    }

    #[test]
    fn test_display_round_trip() {
        for name in Style::NAMES {
            assert_eq!(Style::from_str(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_default() {
        assert_eq!(Style::default(), Style::Text);
    }
}
