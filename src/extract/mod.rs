//! Page extraction
//!
//! The core of the service: the sequential page extraction pipeline, its
//! data model, and the in-memory store for completed runs.

mod pipeline;
mod store;

use serde::{Deserialize, Serialize};

pub use pipeline::{encode_bitmap, extract_pages, toggle_selection, SNAPSHOT_INTERVAL};
pub use store::{Extraction, ExtractionStore};

/// Encoded image format for extracted pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// MIME type for HTTP responses
    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Parse a user-supplied format name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Png
    }
}

/// Immutable parameters for one extraction run
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Encoded image format
    pub format: OutputFormat,
    /// Encoding quality as a fraction in (0, 1]. Ignored for PNG.
    pub quality: f32,
    /// Scale multiplier applied to each page's native dimensions
    pub scale: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: 0.92,
            scale: 2.0,
        }
    }
}

/// One extracted page: encoded image plus its selection flag
///
/// Immutable once created except for `selected`, which the user toggles
/// after extraction. `index` is 1-based and follows document page order.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub index: usize,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub selected: bool,
}
