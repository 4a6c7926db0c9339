use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use rendoc_converter::Converter;
use rendoc_renderers_core::{Options, Renderer, Style};
use rendoc_renderers_devsite::DevSiteRenderer;
use rendoc_renderers_html::HtmlRenderer;
use rendoc_renderers_man::ManRenderer;
use rendoc_renderers_markdown::MarkdownRenderer;
use rendoc_renderers_text::TextRenderer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Renders markdown command help documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Markdown file to render; reads stdin when omitted
    file: Option<PathBuf>,

    /// Output document style
    #[arg(long, value_parser = clap::value_parser!(Style), default_value_t = Style::Text)]
    style: Style,

    /// Sentences to add to the NOTES section, created if the document
    /// has none
    #[arg(long)]
    notes: Option<String>,

    /// Document title, for backends that display one
    #[arg(long)]
    title: Option<String>,

    /// Page width in display columns
    #[arg(long, default_value_t = 80)]
    width: usize,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match &args.file {
        Some(path) => {
            let input = BufReader::new(File::open(path)?);
            render(&args, input)
        }
        None => render(&args, io::stdin().lock()),
    }
}

#[tracing::instrument(skip(input))]
fn render<I: BufRead>(args: &Args, input: I) -> Result<()> {
    let mut options = Options::builder().width(args.width);
    if let Some(title) = &args.title {
        options = options.title(title);
    }
    let options = options.build();
    let out = io::stdout().lock();

    match args.style {
        Style::Devsite => run(DevSiteRenderer::new(out, options), input, args),
        Style::Html => run(HtmlRenderer::new(out, options), input, args),
        Style::Man => run(ManRenderer::new(out, options), input, args),
        Style::Markdown => run(MarkdownRenderer::new(out, options), input, args),
        Style::Text => run(TextRenderer::new(out, options), input, args),
    }
}

fn run<R: Renderer, I: BufRead>(mut renderer: R, input: I, args: &Args) -> Result<()> {
    let mut converter = Converter::new(&mut renderer, input);
    if let Some(notes) = &args.notes {
        converter = converter.with_notes(notes.as_str());
    }
    converter.run()?;
    Ok(())
}
