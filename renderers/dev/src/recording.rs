//! A backend that records the primitive calls it receives.

use std::io;

use rendoc_renderers_core::{Emphasis, Renderer, Style};

/// One recorded renderer primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// A font toggle marker was requested.
    Font(Emphasis),
    /// A hyperlink marker was requested.
    Link {
        /// The link target.
        target: String,
        /// The link text; empty means the target doubles as the text.
        text: String,
    },
    /// One reflowable paragraph unit.
    Fill(String),
    /// A section heading with its level.
    Heading(usize, String),
    /// One command synopsis line.
    Synopsis(String),
    /// A list item, or a close when `label` is absent and `depth` is 0.
    List {
        /// Nesting depth of the item.
        depth: usize,
        /// Definition label; absent for bullet items and closes.
        label: Option<String>,
    },
    /// A table header, row, or close marker.
    Table(Option<String>),
    /// One literally-formatted example line.
    Example(String),
    /// A blank-line spacer.
    Line,
    /// Raw passthrough text from the identity path.
    Write(String),
    /// The document is complete.
    Finish,
}

/// A [`Renderer`] that records every primitive call.
///
/// Inline primitives return readable placeholder markers (`<B>`, `<I>`,
/// `<C>`, `<LINK:target[text]>`) so the converted text stays assertable.
/// The reported [`Style`] is configurable to exercise style-dependent
/// driver paths.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<Call>,
    style: Style,
}

impl RecordingRenderer {
    /// Create a recorder reporting the default (text) style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style this recorder reports to the converter.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The calls recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Consume the recorder, returning the recorded calls.
    #[must_use]
    pub fn into_calls(self) -> Vec<Call> {
        self.calls
    }
}

impl Renderer for RecordingRenderer {
    fn style(&self) -> Style {
        self.style
    }

    fn font(&mut self, emphasis: Emphasis) -> String {
        self.calls.push(Call::Font(emphasis));
        match emphasis {
            Emphasis::Bold => "<B>".to_string(),
            Emphasis::Italic => "<I>".to_string(),
            Emphasis::Code => "<C>".to_string(),
        }
    }

    fn link(&mut self, target: &str, text: &str) -> String {
        self.calls.push(Call::Link {
            target: target.to_string(),
            text: text.to_string(),
        });
        format!("<LINK:{target}[{text}]>")
    }

    fn fill(&mut self, text: &str) -> io::Result<()> {
        self.calls.push(Call::Fill(text.to_string()));
        Ok(())
    }

    fn heading(&mut self, level: usize, text: &str) -> io::Result<()> {
        self.calls.push(Call::Heading(level, text.to_string()));
        Ok(())
    }

    fn synopsis(&mut self, text: &str) -> io::Result<()> {
        self.calls.push(Call::Synopsis(text.to_string()));
        Ok(())
    }

    fn list(&mut self, depth: usize, label: Option<&str>) -> io::Result<()> {
        self.calls.push(Call::List {
            depth,
            label: label.map(str::to_string),
        });
        Ok(())
    }

    fn table(&mut self, row: Option<&str>) -> io::Result<()> {
        self.calls.push(Call::Table(row.map(str::to_string)));
        Ok(())
    }

    fn example(&mut self, text: &str) -> io::Result<()> {
        self.calls.push(Call::Example(text.to_string()));
        Ok(())
    }

    fn line(&mut self) -> io::Result<()> {
        self.calls.push(Call::Line);
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.calls.push(Call::Write(text.to_string()));
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.calls.push(Call::Finish);
        Ok(())
    }
}
