//! HTML backend.
//!
//! Renders the document as plain HTML: `<hN>` headings, `<ul>`/`<dl>`
//! stacks mirroring the converter's nesting discipline, `<pre>` runs for
//! example blocks, `<table>` for CSV table blocks, and `<b>`/`<i>`/
//! `<code>` font toggles. When a title is configured the output gets a
//! full document wrapper; otherwise it is an embeddable fragment.

use std::borrow::Cow;
use std::io::{self, Write};

use rendoc_renderers_core::{Emphasis, Options, Renderer, Style, table::split_row};

/// Escape text for safe inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if text.contains(['&', '<', '>']) {
        Cow::Owned(
            text.replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
        )
    } else {
        Cow::Borrowed(text)
    }
}

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Bullet { item_open: bool },
    Definition { item_open: bool },
}

/// HTML renderer writing to `W`.
#[derive(Debug)]
pub struct HtmlRenderer<W: Write> {
    out: W,
    options: Options,
    lists: Vec<ListKind>,
    bold: bool,
    italic: bool,
    code: bool,
    table_open: bool,
    header_done: bool,
    example_open: bool,
    wrapper: bool,
    started: bool,
}

impl<W: Write> HtmlRenderer<W> {
    /// Create an HTML renderer writing to `out`.
    pub fn new(out: W, options: Options) -> Self {
        Self {
            out,
            options,
            lists: Vec::new(),
            bold: false,
            italic: false,
            code: false,
            table_open: false,
            header_done: false,
            example_open: false,
            wrapper: false,
            started: false,
        }
    }

    /// Mutable access to the underlying writer, for composing backends.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn prologue(&mut self) -> io::Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        if let Some(title) = self.options.title() {
            writeln!(self.out, "<html>")?;
            writeln!(self.out, "<head>")?;
            writeln!(self.out, "<title>{}</title>", escape_html(title))?;
            writeln!(self.out, "</head>")?;
            writeln!(self.out, "<body>")?;
            self.wrapper = true;
        }
        Ok(())
    }

    fn end_example(&mut self) -> io::Result<()> {
        if self.example_open {
            writeln!(self.out, "</pre>")?;
            self.example_open = false;
        }
        Ok(())
    }

    fn close_one(&mut self) -> io::Result<()> {
        match self.lists.pop() {
            Some(ListKind::Bullet { item_open }) => {
                if item_open {
                    writeln!(self.out, "</li>")?;
                }
                writeln!(self.out, "</ul>")?;
            }
            Some(ListKind::Definition { item_open }) => {
                if item_open {
                    writeln!(self.out, "</dd>")?;
                }
                writeln!(self.out, "</dl>")?;
            }
            None => {}
        }
        Ok(())
    }

    fn close_lists(&mut self, depth: usize) -> io::Result<()> {
        while self.lists.len() > depth {
            self.close_one()?;
        }
        Ok(())
    }

    /// Close and reopen list levels so the top of the stack is a list of
    /// the wanted kind at exactly `depth`.
    fn set_depth(&mut self, depth: usize, bullet: bool) -> io::Result<()> {
        self.close_lists(depth)?;
        if self.lists.len() == depth {
            let top_is_bullet = matches!(self.lists.last(), Some(ListKind::Bullet { .. }));
            if !self.lists.is_empty() && top_is_bullet != bullet {
                self.close_one()?;
            }
        }
        while self.lists.len() < depth {
            if bullet {
                writeln!(self.out, "<ul>")?;
                self.lists.push(ListKind::Bullet { item_open: false });
            } else {
                writeln!(self.out, "<dl>")?;
                self.lists.push(ListKind::Definition { item_open: false });
            }
        }
        Ok(())
    }
}

impl<W: Write> Renderer for HtmlRenderer<W> {
    fn style(&self) -> Style {
        Style::Html
    }

    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        escape_html(text)
    }

    fn font(&mut self, emphasis: Emphasis) -> String {
        let (state, on, off) = match emphasis {
            Emphasis::Bold => (&mut self.bold, "<b>", "</b>"),
            Emphasis::Italic => (&mut self.italic, "<i>", "</i>"),
            Emphasis::Code => (&mut self.code, "<code>", "</code>"),
        };
        *state = !*state;
        if *state { on } else { off }.to_string()
    }

    fn link(&mut self, target: &str, text: &str) -> String {
        let text = if text.is_empty() { target } else { text };
        format!("<a href=\"{target}\">{text}</a>")
    }

    fn fill(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.end_example()?;
        writeln!(self.out, "<p>{text}</p>")
    }

    fn heading(&mut self, level: usize, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.end_example()?;
        self.close_lists(0)?;
        let level = level.clamp(1, 6);
        writeln!(self.out, "<h{level}>{text}</h{level}>")
    }

    fn synopsis(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        writeln!(self.out, "<p><code>{text}</code></p>")
    }

    fn list(&mut self, depth: usize, label: Option<&str>) -> io::Result<()> {
        self.prologue()?;
        self.end_example()?;
        match label {
            None if depth == 0 => self.close_lists(0),
            Some(label) => {
                self.set_depth(depth, false)?;
                if let Some(ListKind::Definition { item_open }) = self.lists.last_mut() {
                    if *item_open {
                        writeln!(self.out, "</dd>")?;
                    }
                    *item_open = true;
                }
                writeln!(self.out, "<dt>{label}</dt>")?;
                writeln!(self.out, "<dd>")
            }
            None => {
                self.set_depth(depth, true)?;
                if let Some(ListKind::Bullet { item_open }) = self.lists.last_mut() {
                    if *item_open {
                        writeln!(self.out, "</li>")?;
                    }
                    *item_open = true;
                }
                writeln!(self.out, "<li>")
            }
        }
    }

    fn table(&mut self, row: Option<&str>) -> io::Result<()> {
        self.prologue()?;
        match row {
            Some(_) if !self.table_open => {
                self.table_open = true;
                self.header_done = false;
                writeln!(self.out, "<table>")
            }
            Some(row) => {
                let tag = if self.header_done { "td" } else { "th" };
                self.header_done = true;
                write!(self.out, "<tr>")?;
                for cell in split_row(row) {
                    write!(self.out, "<{tag}>{cell}</{tag}>")?;
                }
                writeln!(self.out, "</tr>")
            }
            None => {
                self.table_open = false;
                writeln!(self.out, "</table>")
            }
        }
    }

    fn example(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        if !self.example_open {
            writeln!(self.out, "<pre>")?;
            self.example_open = true;
        }
        writeln!(self.out, "{text}")
    }

    fn line(&mut self) -> io::Result<()> {
        self.prologue()?;
        writeln!(self.out)
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.out.write_all(text.as_bytes())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.end_example()?;
        self.close_lists(0)?;
        if self.table_open {
            writeln!(self.out, "</table>")?;
            self.table_open = false;
        }
        if self.wrapper {
            writeln!(self.out, "</body>")?;
            writeln!(self.out, "</html>")?;
        }
        self.out.flush()
    }
}
