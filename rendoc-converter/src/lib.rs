//! Markdown dialect document converter.
//!
//! This crate reads the restricted, line-oriented markdown grammar used
//! for command help text and renders it through a pluggable backend.
//! Backends are self-contained, so documents can be generated on the fly
//! for any target: plain text, HTML, manpages, devsite web pages, or
//! markdown itself with NOTES edits applied.
//!
//! The [`Converter`] parses markdown from an input stream and renders it
//! through the [`Renderer`](rendoc_renderers_core::Renderer) primitives,
//! an abstract document model matching markdown entities to the output
//! document: font embellishment, section headings, lists, hanging
//! indents, text margins, tables. There is one backend crate per output
//! style; see `rendoc-renderers-*`.
//!
//! # Example
//!
//! ```ignore
//! use rendoc_converter::Converter;
//!
//! let mut renderer = rendoc_renderers_text::TextRenderer::new(out, options);
//! Converter::new(&mut renderer, input)
//!     .with_notes("Run $ gcloud help for an overview.")
//!     .run()?;
//! ```

mod converter;
mod error;
mod inline;
mod state;

pub use converter::Converter;
pub use error::Error;
