//! Document error types
//!
//! Errors raised by the rendering collaborator and the extraction pipeline.

use thiserror::Error;

/// Errors from document opening, rendering, and encoding
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Input bytes could not be parsed as a document. Fatal to the run.
    #[error("Failed to read document: {0}")]
    Read(String),

    /// Page index out of range
    #[error("Page not found: index {0}")]
    PageNotFound(usize),

    /// Failed to rasterize a page. Fatal to the run; accumulated
    /// records are discarded.
    #[error("Render error: {0}")]
    Render(String),

    /// Failed to encode a rasterized bitmap
    #[error("Encode error: {0}")]
    Encode(String),
}

/// Result type alias for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::Render(err.to_string())
    }
}
