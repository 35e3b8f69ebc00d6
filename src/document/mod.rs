//! Document rendering collaborator
//!
//! The extraction pipeline consumes the rendering engine through the
//! `PageRenderer` trait; `MupdfRenderer` is the MuPDF-backed implementation.

mod error;
mod mupdf;
mod renderer;

pub use error::{DocumentError, DocumentResult};
pub use renderer::{PageBitmap, PageRenderer};
pub use self::mupdf::MupdfRenderer;
