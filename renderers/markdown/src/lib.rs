//! Markdown identity backend.
//!
//! Markdown output needs no structural reinterpretation, so the driver
//! streams raw input lines through [`write_raw`](MarkdownRenderer::write_raw)
//! with NOTES edits applied along the way. The structural primitives are
//! never invoked on that path; if one arrives anyway it warns and writes
//! nothing rather than inventing markup.

use std::io::{self, Write};

use rendoc_renderers_core::{Emphasis, Options, Renderer, Style};

/// Markdown renderer writing to `W`.
#[derive(Debug)]
pub struct MarkdownRenderer<W: Write> {
    out: W,
}

impl<W: Write> MarkdownRenderer<W> {
    /// Create a markdown renderer writing to `out`.
    ///
    /// Width and title hints do not apply to identity output.
    pub fn new(out: W, options: Options) -> Self {
        let _ = options;
        Self { out }
    }

    fn unexpected(&self, primitive: &str) {
        tracing::warn!(%primitive, "markdown identity backend received a structural call");
    }
}

impl<W: Write> Renderer for MarkdownRenderer<W> {
    fn style(&self) -> Style {
        Style::Markdown
    }

    fn font(&mut self, _emphasis: Emphasis) -> String {
        self.unexpected("font");
        String::new()
    }

    fn link(&mut self, target: &str, text: &str) -> String {
        self.unexpected("link");
        if text.is_empty() {
            target.to_string()
        } else {
            text.to_string()
        }
    }

    fn fill(&mut self, _text: &str) -> io::Result<()> {
        self.unexpected("fill");
        Ok(())
    }

    fn heading(&mut self, _level: usize, _text: &str) -> io::Result<()> {
        self.unexpected("heading");
        Ok(())
    }

    fn synopsis(&mut self, _text: &str) -> io::Result<()> {
        self.unexpected("synopsis");
        Ok(())
    }

    fn list(&mut self, _depth: usize, _label: Option<&str>) -> io::Result<()> {
        self.unexpected("list");
        Ok(())
    }

    fn table(&mut self, _row: Option<&str>) -> io::Result<()> {
        self.unexpected("table");
        Ok(())
    }

    fn example(&mut self, _text: &str) -> io::Result<()> {
        self.unexpected("example");
        Ok(())
    }

    fn line(&mut self) -> io::Result<()> {
        self.unexpected("line");
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rendoc_converter::Converter;

    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let input = "= NAME =\n\nwidget - frob things\n";
        let mut out = Vec::new();
        {
            let mut renderer = MarkdownRenderer::new(&mut out, Options::default());
            Converter::new(&mut renderer, input.as_bytes())
                .run()
                .unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), input);
    }

    #[test]
    fn test_notes_spliced_after_heading() {
        let input = "intro\n== NOTES ==\nexisting\n";
        let mut out = Vec::new();
        {
            let mut renderer = MarkdownRenderer::new(&mut out, Options::default());
            Converter::new(&mut renderer, input.as_bytes())
                .with_notes("Added note.")
                .run()
                .unwrap();
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "intro\n== NOTES ==\n\nAdded note.\nexisting\n"
        );
    }

    #[test]
    fn test_notes_appended_without_heading() {
        let input = "intro\n";
        let mut out = Vec::new();
        {
            let mut renderer = MarkdownRenderer::new(&mut out, Options::default());
            Converter::new(&mut renderer, input.as_bytes())
                .with_notes("Added note.")
                .run()
                .unwrap();
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "intro\n\n\n== NOTES ==\n\nAdded note.\n"
        );
    }
}
