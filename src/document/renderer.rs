//! Page renderer trait
//!
//! The seam between the extraction pipeline and the external rendering
//! engine. The pipeline only needs a page count and a way to rasterize one
//! page at a time; everything else about the engine stays behind this trait.

use async_trait::async_trait;

use super::error::DocumentResult;

/// A rasterized page: RGBA8 pixels, row-major
#[derive(Debug, Clone)]
pub struct PageBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Per-page rendering capability over an opened document
///
/// Implementations own the document handle for the duration of extraction.
/// `render_page` is a suspension point; the pipeline awaits each page in
/// strict ascending order and never renders two pages concurrently.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Total number of pages in the document
    fn page_count(&self) -> usize;

    /// Rasterize the page at `page_index` (zero-based) with the scale
    /// multiplier applied to the page's native dimensions
    async fn render_page(&self, page_index: usize, scale: f32) -> DocumentResult<PageBitmap>;
}
