//! MuPDF-backed page renderer
//!
//! Implements `PageRenderer` over the external MuPDF engine.
//!
//! # Design
//!
//! MuPDF documents are not thread-safe. This wrapper:
//!
//! 1. Keeps the raw document bytes
//! 2. Opens a fresh document for each operation
//! 3. Uses `parking_lot::Mutex` to serialize access
//!
//! Opening validates the input up front: corrupt or unsupported bytes fail
//! here with `DocumentError::Read` before any page work starts. Rendering
//! runs on `tokio::task::spawn_blocking` since MuPDF calls are CPU-bound.

use std::sync::Arc;

use async_trait::async_trait;
use mupdf::{Colorspace, Document, Matrix};
use parking_lot::Mutex;

use super::error::{DocumentError, DocumentResult};
use super::renderer::{PageBitmap, PageRenderer};

const PDF_MIME: &str = "application/pdf";

struct MupdfInner {
    data: Arc<Vec<u8>>,
    page_count: usize,
    /// Serializes document access
    lock: Mutex<()>,
}

// SAFETY: all fields except `lock` are immutable after construction, and
// every MuPDF operation opens a fresh document inside the mutex guard; no
// document reference escapes the closure scope. See with_doc below.
unsafe impl Send for MupdfInner {}
unsafe impl Sync for MupdfInner {}

/// Thread-safe MuPDF renderer over an in-memory document
pub struct MupdfRenderer {
    inner: Arc<MupdfInner>,
}

impl MupdfRenderer {
    /// Open a document from raw bytes
    ///
    /// Fails with `DocumentError::Read` when the bytes cannot be parsed,
    /// which aborts the whole extraction run before any page is rendered.
    pub fn from_bytes(data: Vec<u8>) -> DocumentResult<Self> {
        let doc = Document::from_bytes(&data, PDF_MIME)
            .map_err(|e| DocumentError::Read(e.to_string()))?;
        let page_count = doc
            .page_count()
            .map_err(|e| DocumentError::Read(e.to_string()))? as usize;

        Ok(Self {
            inner: Arc::new(MupdfInner {
                data: Arc::new(data),
                page_count,
                lock: Mutex::new(()),
            }),
        })
    }
}

impl MupdfInner {
    /// Open a fresh document, run the closure, drop the document.
    /// Access is serialized via the mutex.
    fn with_doc<F, R>(&self, f: F) -> DocumentResult<R>
    where
        F: FnOnce(&Document) -> DocumentResult<R>,
    {
        let _guard = self.lock.lock();
        let doc = Document::from_bytes(&self.data, PDF_MIME)?;
        f(&doc)
    }
}

#[async_trait]
impl PageRenderer for MupdfRenderer {
    fn page_count(&self) -> usize {
        self.inner.page_count
    }

    async fn render_page(&self, page_index: usize, scale: f32) -> DocumentResult<PageBitmap> {
        if page_index >= self.inner.page_count {
            return Err(DocumentError::PageNotFound(page_index));
        }

        let inner = self.inner.clone();
        let scale = scale.clamp(0.1, 4.0);

        tokio::task::spawn_blocking(move || {
            inner.with_doc(|doc| {
                let page = doc.load_page(page_index as i32)?;

                let matrix = Matrix::new_scale(scale, scale);
                let colorspace = Colorspace::device_rgb();
                let pixmap = page.to_pixmap(&matrix, &colorspace, true, true)?;

                Ok(pixmap_to_bitmap(&pixmap))
            })
        })
        .await
        .map_err(|e| DocumentError::Render(format!("Task join error: {}", e)))?
    }
}

/// Convert a MuPDF pixmap to an RGBA8 bitmap
fn pixmap_to_bitmap(pixmap: &mupdf::Pixmap) -> PageBitmap {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut pixels = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            let a = if n >= 4 {
                samples.get(offset + 3).copied().unwrap_or(255)
            } else {
                255
            };
            pixels.extend_from_slice(&[r, g, b, a]);
        }
    }

    PageBitmap {
        width,
        height,
        pixels,
    }
}
