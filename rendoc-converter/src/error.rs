//! Error types for the converter.

/// Errors that can occur during document conversion.
///
/// Conversion is total over its input; the only failures are I/O
/// failures on the input stream or the backend's output stream.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error reading input or writing rendered output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
