//! Manpage (roff/troff) backend.
//!
//! Renders the document as roff source for man: a `.TH` prologue from
//! the configured title, `.SH`/`.SS` headings, `.TP` hanging definition
//! items and `.IP` bullets nested with `.RS`/`.RE`, `.nf`/`.fi` runs for
//! synopsis and example blocks, tbl-formatted CSV tables, and
//! `\fB`/`\fI`/`\fP` font toggles.

use std::borrow::Cow;
use std::io::{self, Write};

use rendoc_renderers_core::{Emphasis, Options, Renderer, Style, table::split_row};

mod escape;

use escape::{escape_quoted, guard, manify};

/// The no-fill block currently open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbatim {
    None,
    Synopsis,
    Example,
}

/// Manpage renderer writing roff source to `W`.
#[derive(Debug)]
pub struct ManRenderer<W: Write> {
    out: W,
    options: Options,
    /// Open list levels; levels beyond the first are `.RS` scopes.
    depth: usize,
    bold: bool,
    italic: bool,
    code: bool,
    verbatim: Verbatim,
    /// Collected table rows between open and close, header first.
    rows: Option<Vec<Vec<String>>>,
    /// A `.TP`/`.IP` macro is waiting for its body text.
    item_open: bool,
    started: bool,
}

impl<W: Write> ManRenderer<W> {
    /// Create a manpage renderer writing to `out`.
    pub fn new(out: W, options: Options) -> Self {
        Self {
            out,
            options,
            depth: 0,
            bold: false,
            italic: false,
            code: false,
            verbatim: Verbatim::None,
            rows: None,
            item_open: false,
            started: false,
        }
    }

    fn prologue(&mut self) -> io::Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        // The tbl preprocessor line must come first.
        writeln!(self.out, "'\\\" t")?;
        if let Some(title) = self.options.title() {
            writeln!(
                self.out,
                ".TH \"{}\" \"1\"",
                escape_quoted(&title.to_uppercase())
            )?;
        }
        writeln!(self.out, ".nh")?;
        writeln!(self.out, ".ad l")
    }

    fn end_verbatim(&mut self) -> io::Result<()> {
        match self.verbatim {
            Verbatim::None => {}
            Verbatim::Synopsis => {
                writeln!(self.out, ".fi")?;
            }
            Verbatim::Example => {
                writeln!(self.out, ".RE")?;
                writeln!(self.out, ".fi")?;
            }
        }
        self.verbatim = Verbatim::None;
        Ok(())
    }

    /// Close and open `.RS` scopes until `depth` list levels are open.
    fn set_depth(&mut self, depth: usize) -> io::Result<()> {
        while self.depth > depth {
            if self.depth > 1 {
                writeln!(self.out, ".RE")?;
            }
            self.depth -= 1;
        }
        while self.depth < depth {
            self.depth += 1;
            if self.depth > 1 {
                writeln!(self.out, ".RS 4")?;
            }
        }
        Ok(())
    }

    fn flush_table(&mut self) -> io::Result<()> {
        let Some(rows) = self.rows.take() else {
            return Ok(());
        };
        if rows.is_empty() {
            return Ok(());
        }
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        writeln!(self.out, ".TS")?;
        writeln!(self.out, "allbox tab(|);")?;
        // First format line styles the header row, the last all others.
        writeln!(self.out, "{}", vec!["lb"; columns].join(" "))?;
        writeln!(self.out, "{}.", vec!["l"; columns].join(" "))?;
        for row in &rows {
            writeln!(self.out, "{}", row.join("|"))?;
        }
        writeln!(self.out, ".TE")
    }
}

impl<W: Write> Renderer for ManRenderer<W> {
    fn style(&self) -> Style {
        Style::Man
    }

    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        manify(text)
    }

    fn font(&mut self, emphasis: Emphasis) -> String {
        let state = match emphasis {
            Emphasis::Bold => &mut self.bold,
            Emphasis::Italic => &mut self.italic,
            Emphasis::Code => &mut self.code,
        };
        *state = !*state;
        if !*state {
            "\\fP".to_string()
        } else if emphasis == Emphasis::Italic {
            "\\fI".to_string()
        } else {
            // Monospace maps to bold; man output has no fixed-width shift.
            "\\fB".to_string()
        }
    }

    fn link(&mut self, target: &str, text: &str) -> String {
        if text.is_empty() || text == target {
            target.to_string()
        } else {
            format!("{text} <{target}>")
        }
    }

    fn fill(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.end_verbatim()?;
        let text = text.trim_start();
        if self.item_open {
            self.item_open = false;
        } else if self.depth == 0 {
            writeln!(self.out, ".PP")?;
        }
        writeln!(self.out, "{}", guard(text))
    }

    fn heading(&mut self, level: usize, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.end_verbatim()?;
        self.set_depth(0)?;
        self.item_open = false;
        let macro_name = if level <= 2 { ".SH" } else { ".SS" };
        writeln!(self.out, "{macro_name} \"{text}\"")
    }

    fn synopsis(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        if self.verbatim != Verbatim::Synopsis {
            self.end_verbatim()?;
            writeln!(self.out, ".sp")?;
            writeln!(self.out, ".nf")?;
            self.verbatim = Verbatim::Synopsis;
        }
        writeln!(self.out, "{}", guard(text))
    }

    fn list(&mut self, depth: usize, label: Option<&str>) -> io::Result<()> {
        self.prologue()?;
        self.end_verbatim()?;
        match label {
            None if depth == 0 => {
                self.set_depth(0)?;
                self.item_open = false;
                Ok(())
            }
            Some(label) => {
                self.set_depth(depth)?;
                self.item_open = true;
                writeln!(self.out, ".TP")?;
                writeln!(self.out, "\\fB{}\\fP", guard(label))
            }
            None => {
                self.set_depth(depth)?;
                self.item_open = true;
                writeln!(self.out, ".IP \\(bu 2")
            }
        }
    }

    fn table(&mut self, row: Option<&str>) -> io::Result<()> {
        self.prologue()?;
        match row {
            // The opening call carries the format line; tbl layout here
            // is fixed, so only the fact that a table opened matters.
            Some(_) if self.rows.is_none() => {
                self.rows = Some(Vec::new());
                Ok(())
            }
            Some(row) => {
                if let Some(rows) = &mut self.rows {
                    rows.push(split_row(row));
                }
                Ok(())
            }
            None => {
                self.end_verbatim()?;
                self.flush_table()
            }
        }
    }

    fn example(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        if self.verbatim != Verbatim::Example {
            self.end_verbatim()?;
            writeln!(self.out, ".sp")?;
            writeln!(self.out, ".nf")?;
            writeln!(self.out, ".RS 4")?;
            self.verbatim = Verbatim::Example;
        }
        writeln!(self.out, "{}", guard(text))
    }

    fn line(&mut self) -> io::Result<()> {
        self.prologue()?;
        writeln!(self.out, ".sp")
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.end_verbatim()?;
        self.set_depth(0)?;
        self.flush_table()?;
        self.out.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn renderer(buf: &mut Vec<u8>) -> ManRenderer<&mut Vec<u8>> {
        ManRenderer::new(buf, Options::default())
    }

    #[test]
    fn test_prologue_with_title() {
        let mut out = Vec::new();
        {
            let options = Options::builder().title("gcloud").build();
            let mut r = ManRenderer::new(&mut out, options);
            r.heading(1, "NAME").unwrap();
        }
        let roff = String::from_utf8(out).unwrap();
        assert_eq!(
            roff,
            "'\\\" t\n.TH \"GCLOUD\" \"1\"\n.nh\n.ad l\n.SH \"NAME\"\n"
        );
    }

    #[test]
    fn test_heading_levels() {
        let mut out = Vec::new();
        {
            let mut r = renderer(&mut out);
            r.heading(2, "NOTES").unwrap();
            r.heading(3, "Subsection").unwrap();
        }
        let roff = String::from_utf8(out).unwrap();
        assert!(roff.contains(".SH \"NOTES\"\n"));
        assert!(roff.contains(".SS \"Subsection\"\n"));
    }

    #[test]
    fn test_font_toggles() {
        let mut out = Vec::new();
        let mut r = renderer(&mut out);
        assert_eq!(r.font(Emphasis::Bold), "\\fB");
        assert_eq!(r.font(Emphasis::Bold), "\\fP");
        assert_eq!(r.font(Emphasis::Italic), "\\fI");
        assert_eq!(r.font(Emphasis::Italic), "\\fP");
        assert_eq!(r.font(Emphasis::Code), "\\fB");
    }

    #[test]
    fn test_definition_item_body_follows_tag() {
        let mut out = Vec::new();
        {
            let mut r = renderer(&mut out);
            r.list(1, Some("\\-\\-verbose")).unwrap();
            r.fill("Talk more.").unwrap();
        }
        let roff = String::from_utf8(out).unwrap();
        assert!(roff.ends_with(".TP\n\\fB\\-\\-verbose\\fP\nTalk more.\n"));
    }

    #[test]
    fn test_nested_bullets_use_rs_re() {
        let mut out = Vec::new();
        {
            let mut r = renderer(&mut out);
            r.list(1, None).unwrap();
            r.fill("outer").unwrap();
            r.list(2, None).unwrap();
            r.fill("inner").unwrap();
            r.list(0, None).unwrap();
        }
        let roff = String::from_utf8(out).unwrap();
        assert!(roff.ends_with(
            ".IP \\(bu 2\nouter\n.RS 4\n.IP \\(bu 2\ninner\n.RE\n"
        ));
    }

    #[test]
    fn test_example_block_wrapped_in_nofill() {
        let mut out = Vec::new();
        {
            let mut r = renderer(&mut out);
            r.example("$ gcloud init").unwrap();
            r.example("$ gcloud info").unwrap();
            r.fill("After.").unwrap();
        }
        let roff = String::from_utf8(out).unwrap();
        assert!(roff.ends_with(
            ".sp\n.nf\n.RS 4\n$ gcloud init\n$ gcloud info\n.RE\n.fi\n.PP\nAfter.\n"
        ));
    }

    #[test]
    fn test_synopsis_block() {
        let mut out = Vec::new();
        {
            let mut r = renderer(&mut out);
            r.synopsis("gcloud compute ssh").unwrap();
            r.synopsis("  [\\-\\-zone ZONE]").unwrap();
            r.finish().unwrap();
        }
        let roff = String::from_utf8(out).unwrap();
        assert!(roff.ends_with(
            ".sp\n.nf\ngcloud compute ssh\n  [\\-\\-zone ZONE]\n.fi\n"
        ));
    }

    #[test]
    fn test_table_renders_tbl_block() {
        let mut out = Vec::new();
        {
            let mut r = renderer(&mut out);
            r.table(Some("[format=\"csv\"]")).unwrap();
            r.table(Some("name,zone")).unwrap();
            r.table(Some("a,us-east1-b")).unwrap();
            r.table(None).unwrap();
        }
        let roff = String::from_utf8(out).unwrap();
        assert!(roff.ends_with(
            ".TS\nallbox tab(|);\nlb lb\nl l.\nname|zone\na|us-east1-b\n.TE\n"
        ));
    }

    #[test]
    fn test_leading_period_guarded() {
        let mut out = Vec::new();
        {
            let mut r = renderer(&mut out);
            r.fill(".profile is read at login").unwrap();
        }
        let roff = String::from_utf8(out).unwrap();
        assert!(roff.ends_with(".PP\n\\&.profile is read at login\n"));
    }
}
