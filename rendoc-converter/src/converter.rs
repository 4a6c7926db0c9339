//! The line classifier chain and document driver.

use std::io::BufRead;

use rendoc_renderers_core::{Renderer, Style};

use crate::{Error, inline, state::ListElementState};

/// Outcome of one classifier step.
enum Pass {
    /// The line was consumed; move to the next input line.
    Consumed,
    /// Not matched; continue down the chain with the given cursor.
    Continue(usize),
}

/// Reads the markdown dialect and renders it through a backend.
///
/// One instance performs one conversion; the backend and the input
/// stream are borrowed for the duration of [`run`](Converter::run).
/// Concurrent conversions of the same document need independent
/// instances.
pub struct Converter<'r, R, I> {
    renderer: &'r mut R,
    input: I,
    /// Inline-unprocessed text awaiting flush as one fill unit.
    buf: String,
    /// Sentences for the NOTES section, until consumed.
    notes: Option<String>,
    /// Per-depth list state, indexed by `depth`. Grows, never shrinks.
    lists: Vec<ListElementState>,
    /// Current list nesting depth counting from 0.
    depth: usize,
    /// Left margin of the current example block; 0 means no example.
    example: usize,
    next_example: usize,
    /// True if the previous line was a `+` paragraph at current indent.
    paragraph: bool,
    next_paragraph: bool,
}

impl<'r, R: Renderer, I: BufRead> Converter<'r, R, I> {
    /// Create a converter reading markdown from `input` and drawing on
    /// `renderer`.
    pub fn new(renderer: &'r mut R, input: I) -> Self {
        Self {
            renderer,
            input,
            buf: String::new(),
            notes: None,
            lists: vec![ListElementState::default()],
            depth: 0,
            example: 0,
            next_example: 0,
            paragraph: false,
            next_paragraph: false,
        }
    }

    /// Set sentences to inject into the NOTES section, which is created
    /// at the end of the document if the input has none.
    #[must_use]
    pub fn with_notes<S: Into<String>>(mut self, notes: S) -> Self {
        let notes = notes.into();
        self.notes = if notes.is_empty() { None } else { Some(notes) };
        self
    }

    /// Render the document.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading the input or writing through
    /// the backend fails; no input line fails conversion.
    pub fn run(mut self) -> Result<(), Error> {
        tracing::debug!(style = %self.renderer.style(), "rendering document");
        if self.renderer.style() == Style::Markdown {
            return self.convert_markdown_to_markdown();
        }
        loop {
            self.example = self.next_example;
            self.next_example = 0;
            self.paragraph = self.next_paragraph;
            self.next_paragraph = false;
            let Some(raw) = self.read_line()? else { break };
            self.dispatch(raw.trim_end())?;
        }
        self.finish()
    }

    /// Run `line` through the classifier chain until one consumes it.
    fn dispatch(&mut self, line: &str) -> Result<(), Error> {
        let steps: [fn(&mut Self, &str, usize) -> Result<Pass, Error>; 9] = [
            Self::convert_blank_line,
            Self::convert_paragraph,
            Self::convert_heading,
            Self::convert_table,
            Self::convert_definition_list,
            Self::convert_bullet_list,
            Self::convert_example,
            Self::convert_end_of_list,
            Self::convert_remainder,
        ];
        let mut i = 0;
        for step in steps {
            match step(self, line, i)? {
                Pass::Consumed => break,
                Pass::Continue(next) => i = next,
            }
        }
        Ok(())
    }

    /// Read the next markdown line, untrimmed, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    fn current(&self) -> &ListElementState {
        &self.lists[self.depth]
    }

    fn current_mut(&mut self) -> &mut ListElementState {
        &mut self.lists[self.depth]
    }

    /// Push one nesting level, growing the stack on demand.
    fn push_level(&mut self) {
        self.depth += 1;
        if self.depth >= self.lists.len() {
            self.lists.push(ListElementState::default());
        }
    }

    /// Convert inline markup in the pending buffer, draining it.
    fn attributes(&mut self) -> String {
        let buf = std::mem::take(&mut self.buf);
        if buf.is_empty() {
            String::new()
        } else {
            inline::convert_attributes(&mut *self.renderer, &buf)
        }
    }

    /// Send the pending buffer to the backend as one fill unit.
    fn fill(&mut self) -> Result<(), Error> {
        if !self.buf.is_empty() {
            let text = self.attributes();
            self.renderer.fill(&text)?;
        }
        Ok(())
    }

    /// Blank line: close a pending bullet, emit a spacer unless a list
    /// is still swallowing blanks.
    fn convert_blank_line(&mut self, line: &str, i: usize) -> Result<Pass, Error> {
        if !line.is_empty() {
            return Ok(Pass::Continue(i));
        }
        self.fill()?;
        if self.current().bullet {
            self.renderer.list(0, None)?;
            self.depth = self.depth.saturating_sub(1);
        }
        if self.current().ignore_line > 0 {
            self.current_mut().ignore_line -= 1;
        }
        if self.depth == 0 || self.current().ignore_line == 0 {
            self.renderer.line()?;
        }
        Ok(Pass::Consumed)
    }

    /// `+` on a line by itself: blank spacer, but the next line starts a
    /// new paragraph at the current indentation.
    fn convert_paragraph(&mut self, line: &str, i: usize) -> Result<Pass, Error> {
        if line != "+" {
            return Ok(Pass::Continue(i));
        }
        self.fill()?;
        self.renderer.line()?;
        self.next_paragraph = true;
        Ok(Pass::Consumed)
    }

    /// `= text =` heading with symmetric delimiter runs and exactly one
    /// space on each side of the text.
    fn convert_heading(&mut self, line: &str, i: usize) -> Result<Pass, Error> {
        let bytes = line.as_bytes();
        let n = bytes.len();
        let mut k = i;
        while k < n && bytes[k] == b'=' && bytes[n - (k + 1)] == b'=' {
            k += 1;
        }
        if k == 0 || k >= n || bytes[k] != b' ' || bytes[n - (k + 1)] != b' ' {
            return Ok(Pass::Continue(i));
        }
        self.fill()?;
        let text_end = n - (k + 1);
        if k + 1 <= text_end {
            self.buf.push_str(&line[k + 1..text_end]);
        }
        let heading = self.attributes();
        self.renderer.heading(k, &heading)?;
        self.depth = 0;
        if heading == "NAME" || heading == "SYNOPSIS" {
            self.convert_synopsis()?;
        } else if heading == "NOTES" {
            // Splicing here prevents a duplicate section at finish.
            if let Some(notes) = self.notes.take() {
                self.buf = notes;
            }
        }
        Ok(Pass::Consumed)
    }

    /// Consume the command summary block under a NAME or SYNOPSIS
    /// heading, bypassing the normal chain.
    ///
    /// Blank lines before the first content line are skipped; the first
    /// blank line after it ends the block.
    fn convert_synopsis(&mut self) -> Result<(), Error> {
        let mut seen_content = false;
        loop {
            let Some(raw) = self.read_line()? else { break };
            let line = raw.trim_end();
            if line.is_empty() {
                if seen_content {
                    break;
                }
                continue;
            }
            seen_content = true;
            self.buf.push_str(line);
            let text = self.attributes();
            self.renderer.synopsis(&text)?;
        }
        Ok(())
    }

    /// `[...format="csv"...]` table block. Consumes its own lines until
    /// the second `|====` delimiter.
    fn convert_table(&mut self, line: &str, i: usize) -> Result<Pass, Error> {
        if !line.starts_with('[') || !line.ends_with(']') || !line.contains(r#"format="csv""#) {
            return Ok(Pass::Continue(i));
        }
        self.fill()?;
        self.renderer.table(Some(line))?;
        let mut delim = 2;
        loop {
            let Some(raw) = self.read_line()? else {
                tracing::warn!("table block not terminated before end of input");
                break;
            };
            let row = raw.trim_end();
            if row.starts_with("|====") {
                delim -= 1;
                if delim <= 0 {
                    break;
                }
            } else {
                self.buf.push_str(row);
                let text = self.attributes();
                self.renderer.table(Some(&text))?;
            }
        }
        self.buf.clear();
        self.renderer.table(None)?;
        Ok(Pass::Consumed)
    }

    /// `term::` definition list item; the colon run length sets the
    /// nesting level.
    fn convert_definition_list(&mut self, line: &str, i: usize) -> Result<Pass, Error> {
        let bytes = line.as_bytes();
        let mut i = i;
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        if i > 0 {
            // Indented lines are not definition items, but the cursor
            // carries the indentation for the detectors behind us.
            return Ok(Pass::Continue(i));
        }
        let Some(j) = line.find("::") else {
            return Ok(Pass::Continue(i));
        };
        let mut level = 1;
        let mut k = j + 2;
        while k < bytes.len() && bytes[k] == b':' {
            k += 1;
            level += 1;
        }
        if self.current().bullet || self.current().level < level {
            self.push_level();
        } else {
            while self.current().level > level {
                self.depth -= 1;
            }
        }
        let state = self.current_mut();
        state.bullet = false;
        state.ignore_line = 2;
        state.level = level;
        while k < bytes.len() && bytes[k] == b' ' {
            k += 1;
        }
        self.fill()?;
        self.buf.push_str(&line[..j]);
        let label = self.attributes();
        self.renderer.list(self.depth, Some(&label))?;
        if k < bytes.len() {
            self.buf.push_str(&line[k..]);
        }
        Ok(Pass::Consumed)
    }

    /// `-`/`*` bullet list item; nesting by marker repetition or by two
    /// spaces of indentation per level.
    fn convert_bullet_list(&mut self, line: &str, i: usize) -> Result<Pass, Error> {
        let bytes = line.as_bytes();
        let Some(&marker) = bytes.get(i) else {
            return Ok(Pass::Continue(i));
        };
        if marker != b'-' && marker != b'*' {
            return Ok(Pass::Continue(i));
        }
        let mut level = i / 2;
        let mut j = i;
        while j < bytes.len() && bytes[j] == marker {
            j += 1;
            level += 1;
        }
        if j >= bytes.len() || bytes[j] != b' ' {
            return Ok(Pass::Continue(i));
        }
        if self.current().bullet && self.current().level >= level {
            while self.current().level > level {
                self.depth -= 1;
            }
        } else {
            self.push_level();
        }
        let state = self.current_mut();
        state.bullet = true;
        state.ignore_line = 0;
        state.level = level;
        self.fill()?;
        self.renderer.list(self.depth, None)?;
        while j < bytes.len() && bytes[j] == b' ' {
            j += 1;
        }
        self.buf.push_str(&line[j..]);
        Ok(Pass::Consumed)
    }

    /// Indented example line. The left margin latches to the minimum
    /// indentation seen so consecutive lines form one block.
    fn convert_example(&mut self, line: &str, i: usize) -> Result<Pass, Error> {
        if i == 0 || (self.depth > 0 && self.example == 0 && !self.paragraph) {
            return Ok(Pass::Continue(i));
        }
        self.fill()?;
        if self.example == 0 || self.example > i {
            self.example = i;
        }
        let text = line.get(self.example..).unwrap_or("");
        if !text.is_empty() {
            self.buf.push_str(text);
            let rendered = self.attributes();
            self.renderer.example(&rendered)?;
        }
        self.next_example = self.example;
        Ok(Pass::Consumed)
    }

    /// Unindented line while a list is open: wind the list down, but let
    /// the chain keep going — the line's content still needs handling.
    fn convert_end_of_list(&mut self, _line: &str, i: usize) -> Result<Pass, Error> {
        if i > 0 || self.depth == 0 {
            return Ok(Pass::Continue(i));
        }
        if self.current().ignore_line > 1 {
            self.current_mut().ignore_line -= 1;
        }
        if self.current().ignore_line == 0 {
            self.fill()?;
            self.renderer.list(0, None)?;
            self.depth = 0;
        }
        Ok(Pass::Continue(i))
    }

    /// Fallback: append the rest of the line to the pending text, with a
    /// space preserving the word boundary across the join.
    fn convert_remainder(&mut self, line: &str, i: usize) -> Result<Pass, Error> {
        self.buf.push(' ');
        self.buf.push_str(line.get(i..).unwrap_or(""));
        Ok(Pass::Consumed)
    }

    /// Flush pending text, synthesize a NOTES section if the notes were
    /// never spliced into one, and let the backend finalize.
    fn finish(&mut self) -> Result<(), Error> {
        self.fill()?;
        if let Some(notes) = self.notes.take() {
            self.renderer.line()?;
            self.renderer.heading(2, "NOTES")?;
            self.buf.push_str(&notes);
            self.fill()?;
        }
        self.renderer.finish()?;
        Ok(())
    }

    /// The identity path: stream raw lines through, splicing notes after
    /// a literal `== NOTES ==` heading line or appending a new section
    /// at the end.
    fn convert_markdown_to_markdown(&mut self) -> Result<(), Error> {
        if self.notes.is_none() {
            let mut rest = String::new();
            self.input.read_to_string(&mut rest)?;
            self.renderer.write_raw(&rest)?;
            return Ok(());
        }
        while let Some(line) = self.read_line()? {
            self.renderer.write_raw(&line)?;
            if line == "== NOTES ==\n" {
                if let Some(notes) = self.notes.take() {
                    self.renderer.write_raw(&format!("\n{notes}\n"))?;
                }
            }
        }
        if let Some(notes) = self.notes.take() {
            self.renderer
                .write_raw(&format!("\n\n== NOTES ==\n\n{notes}\n"))?;
        }
        Ok(())
    }
}
