//! Development and testing utilities for rendoc backends.
//!
//! This crate provides shared utilities for developing and testing
//! backends and the converter core:
//!
//! - [`RecordingRenderer`] - captures the primitive call sequence, since
//!   the converter's contract is which primitive is called, in what
//!   order, with what arguments
//! - [`output`] - output normalization for test comparisons

pub mod output;
mod recording;

pub use recording::{Call, RecordingRenderer};
