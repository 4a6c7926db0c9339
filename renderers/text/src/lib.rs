//! Plain text backend.
//!
//! Renders the document as man-page-like text: headings in bold at the
//! left margin, body text filled and wrapped to the configured page
//! width, bullet and definition items indented by nesting depth, and
//! example blocks set off beyond the body margin. Font toggles use ANSI
//! attributes.

use std::io::{self, Write};

use crossterm::style::Attribute;
use rendoc_renderers_core::{Emphasis, Options, Renderer, Style, table::split_row};

mod table;
mod wrap;

/// Body text indentation per nesting step, in columns.
const INDENT: usize = 4;

/// Plain text renderer writing to `W`.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    options: Options,
    /// Left margin for the next fill.
    fill_indent: usize,
    /// Column for a pending bullet marker, consumed by the next fill.
    marker_col: Option<usize>,
    bold: bool,
    italic: bool,
    code: bool,
    /// Collected table rows between open and close, header first.
    rows: Option<Vec<Vec<String>>>,
    started: bool,
}

impl<W: Write> TextRenderer<W> {
    /// Create a text renderer writing to `out`.
    pub fn new(out: W, options: Options) -> Self {
        Self {
            out,
            options,
            fill_indent: INDENT,
            marker_col: None,
            bold: false,
            italic: false,
            code: false,
            rows: None,
            started: false,
        }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn style(&self) -> Style {
        Style::Text
    }

    fn font(&mut self, emphasis: Emphasis) -> String {
        let (state, on, off) = match emphasis {
            Emphasis::Bold => (&mut self.bold, Attribute::Bold, Attribute::NormalIntensity),
            Emphasis::Italic => (&mut self.italic, Attribute::Italic, Attribute::NoItalic),
            Emphasis::Code => (&mut self.code, Attribute::Underlined, Attribute::NoUnderline),
        };
        *state = !*state;
        if *state {
            format!("{on}")
        } else {
            format!("{off}")
        }
    }

    fn link(&mut self, target: &str, text: &str) -> String {
        if text.is_empty() || text == target {
            target.to_string()
        } else {
            format!("{text} ({target})")
        }
    }

    fn fill(&mut self, text: &str) -> io::Result<()> {
        self.started = true;
        let rest = " ".repeat(self.fill_indent);
        let first = match self.marker_col.take() {
            Some(col) => format!("{}- ", " ".repeat(col)),
            None => rest.clone(),
        };
        let filled = wrap::fill_words(text, self.options.width(), &first, &rest);
        self.out.write_all(filled.as_bytes())
    }

    fn heading(&mut self, level: usize, text: &str) -> io::Result<()> {
        if self.started {
            writeln!(self.out)?;
        }
        self.started = true;
        let pad = " ".repeat(level.saturating_sub(1) * 2);
        writeln!(
            self.out,
            "{pad}{}{text}{}",
            Attribute::Bold,
            Attribute::NormalIntensity
        )?;
        self.fill_indent = INDENT;
        self.marker_col = None;
        Ok(())
    }

    fn synopsis(&mut self, text: &str) -> io::Result<()> {
        self.started = true;
        writeln!(self.out, "{}{text}", " ".repeat(INDENT))
    }

    fn list(&mut self, depth: usize, label: Option<&str>) -> io::Result<()> {
        if depth == 0 && label.is_none() {
            self.fill_indent = INDENT;
            self.marker_col = None;
            return Ok(());
        }
        self.started = true;
        let col = INDENT * depth;
        match label {
            Some(label) => {
                writeln!(
                    self.out,
                    "{}{}{label}{}",
                    " ".repeat(col),
                    Attribute::Bold,
                    Attribute::NormalIntensity
                )?;
                self.fill_indent = col + INDENT;
                self.marker_col = None;
            }
            None => {
                self.marker_col = Some(col);
                self.fill_indent = col + 2;
            }
        }
        Ok(())
    }

    fn table(&mut self, row: Option<&str>) -> io::Result<()> {
        self.started = true;
        match row {
            // The opening call carries the format line; layout here is
            // fixed, so only the fact that a table opened matters.
            Some(_) if self.rows.is_none() => {
                self.rows = Some(Vec::new());
            }
            Some(row) => {
                if let Some(rows) = &mut self.rows {
                    rows.push(split_row(row));
                }
            }
            None => {
                let rows = self.rows.take().unwrap_or_default();
                let text = table::layout(&rows, self.options.width(), self.fill_indent);
                self.out.write_all(text.as_bytes())?;
            }
        }
        Ok(())
    }

    fn example(&mut self, text: &str) -> io::Result<()> {
        self.started = true;
        writeln!(self.out, "{}{text}", " ".repeat(self.fill_indent + 2))
    }

    fn line(&mut self) -> io::Result<()> {
        self.started = true;
        writeln!(self.out)
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.started = true;
        self.out.write_all(text.as_bytes())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
