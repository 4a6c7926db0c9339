//! Devsite web page backend.
//!
//! The devsite style is HTML wrapped in devsite chrome: an
//! `<html devsite>` document shell and devsite-styled synopsis blocks.
//! Everything else delegates to the plain HTML backend rather than
//! reimplementing it.

use std::borrow::Cow;
use std::io::{self, Write};

use rendoc_renderers_core::{Emphasis, Options, Renderer, Style};
use rendoc_renderers_html::{HtmlRenderer, escape_html};

/// Devsite renderer writing to `W`.
#[derive(Debug)]
pub struct DevSiteRenderer<W: Write> {
    inner: HtmlRenderer<W>,
    title: Option<String>,
    started: bool,
}

impl<W: Write> DevSiteRenderer<W> {
    /// Create a devsite renderer writing to `out`.
    ///
    /// The document shell is written here, so the inner HTML backend is
    /// configured without a title and never writes its own wrapper.
    pub fn new(out: W, options: Options) -> Self {
        let title = options.title().map(str::to_string);
        let inner_options = Options::builder().width(options.width()).build();
        Self {
            inner: HtmlRenderer::new(out, inner_options),
            title,
            started: false,
        }
    }

    fn prologue(&mut self) -> io::Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        let out = self.inner.writer_mut();
        writeln!(out, "<html devsite>")?;
        writeln!(out, "<head>")?;
        if let Some(title) = &self.title {
            writeln!(out, "<title>{}</title>", escape_html(title))?;
        }
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")
    }
}

impl<W: Write> Renderer for DevSiteRenderer<W> {
    fn style(&self) -> Style {
        Style::Devsite
    }

    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        escape_html(text)
    }

    fn font(&mut self, emphasis: Emphasis) -> String {
        self.inner.font(emphasis)
    }

    fn link(&mut self, target: &str, text: &str) -> String {
        self.inner.link(target, text)
    }

    fn fill(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.inner.fill(text)
    }

    fn heading(&mut self, level: usize, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.inner.heading(level, text)
    }

    fn synopsis(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        writeln!(
            self.inner.writer_mut(),
            "<pre class=\"devsite-terminal\">{text}</pre>"
        )
    }

    fn list(&mut self, depth: usize, label: Option<&str>) -> io::Result<()> {
        self.prologue()?;
        self.inner.list(depth, label)
    }

    fn table(&mut self, row: Option<&str>) -> io::Result<()> {
        self.prologue()?;
        self.inner.table(row)
    }

    fn example(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.inner.example(text)
    }

    fn line(&mut self) -> io::Result<()> {
        self.prologue()?;
        self.inner.line()
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.prologue()?;
        self.inner.write_raw(text)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.finish()?;
        if self.started {
            let out = self.inner.writer_mut();
            writeln!(out, "</body>")?;
            writeln!(out, "</html>")?;
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_devsite_shell() {
        let mut out = Vec::new();
        {
            let options = Options::builder().title("widget").build();
            let mut r = DevSiteRenderer::new(&mut out, options);
            r.heading(1, "NAME").unwrap();
            r.synopsis("widget run").unwrap();
            r.finish().unwrap();
        }
        let html = String::from_utf8(out).unwrap();
        assert_eq!(
            html,
            "<html devsite>\n<head>\n<title>widget</title>\n<meta charset=\"utf-8\">\n\
             </head>\n<body>\n<h1>NAME</h1>\n<pre class=\"devsite-terminal\">widget run</pre>\n\
             </body>\n</html>\n"
        );
    }

    #[test]
    fn test_empty_document_writes_nothing() {
        let mut out = Vec::new();
        {
            let mut r = DevSiteRenderer::new(&mut out, Options::default());
            r.finish().unwrap();
        }
        assert!(out.is_empty());
    }
}
