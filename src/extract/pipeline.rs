//! Page extraction pipeline
//!
//! Iterates the document's pages in strict ascending order, rasterizes each
//! one through the `PageRenderer` collaborator, encodes the bitmap, and
//! publishes incremental progress snapshots to an observer callback.
//!
//! # Failure policy
//!
//! All-or-nothing. Open failures never reach this function (the renderer is
//! already open); a per-page render or encode failure propagates immediately,
//! discarding every accumulated record. No retry, no skip, no timeout.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::document::{DocumentError, DocumentResult, PageBitmap, PageRenderer};

use super::{ExtractionConfig, OutputFormat, PageRecord};

/// Pages between progress snapshots. A snapshot is also published after the
/// final page, so short documents still report once.
pub const SNAPSHOT_INTERVAL: usize = 5;

/// Extract every page of the document into encoded `PageRecord`s
///
/// `publish` receives the accumulated ordered sequence after page indices
/// that are multiples of [`SNAPSHOT_INTERVAL`] and after the final page.
/// The batching bounds observer update frequency for large documents and has
/// no effect on the final result.
///
/// An empty document completes immediately with an empty sequence and no
/// snapshot. On success the records carry indices `1..=page_count`, each
/// with `selected = true`.
pub async fn extract_pages<R, F>(
    renderer: &R,
    config: &ExtractionConfig,
    mut publish: F,
) -> DocumentResult<Vec<PageRecord>>
where
    R: PageRenderer + ?Sized,
    F: FnMut(&[PageRecord]),
{
    let page_count = renderer.page_count();
    let mut records = Vec::with_capacity(page_count);

    for index in 1..=page_count {
        let bitmap = renderer.render_page(index - 1, config.scale).await?;
        let data = encode_bitmap(&bitmap, config)?;

        records.push(PageRecord {
            index,
            width: bitmap.width,
            height: bitmap.height,
            data,
            selected: true,
        });

        if index % SNAPSHOT_INTERVAL == 0 || index == page_count {
            publish(&records);
        }
    }

    Ok(records)
}

/// Encode a rasterized bitmap using the run configuration
///
/// PNG ignores `quality`; JPEG maps the (0, 1] fraction onto the encoder's
/// 1-100 scale and drops the alpha channel.
pub fn encode_bitmap(bitmap: &PageBitmap, config: &ExtractionConfig) -> DocumentResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.pixels.clone())
        .ok_or_else(|| {
            DocumentError::Encode("bitmap buffer does not match dimensions".to_string())
        })?;

    let mut out = Cursor::new(Vec::new());
    match config.format {
        OutputFormat::Png => {
            DynamicImage::ImageRgba8(img)
                .write_to(&mut out, image::ImageFormat::Png)
                .map_err(|e| DocumentError::Encode(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let quality = (config.quality.clamp(0.01, 1.0) * 100.0).round() as u8;
            let encoder = JpegEncoder::new_with_quality(&mut out, quality);
            DynamicImage::ImageRgba8(img)
                .to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| DocumentError::Encode(e.to_string()))?;
        }
    }

    Ok(out.into_inner())
}

/// Flip the `selected` flag on the record with the given 1-based index
///
/// Returns the new flag value, or `None` when no record has that index
/// (a no-op that leaves the sequence unchanged).
pub fn toggle_selection(records: &mut [PageRecord], index: usize) -> Option<bool> {
    records.iter_mut().find(|r| r.index == index).map(|r| {
        r.selected = !r.selected;
        r.selected
    })
}
