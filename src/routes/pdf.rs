//! PDF extraction API endpoints
//!
//! - Upload a PDF and extract every page to images
//! - Inspect a stored run and download individual pages
//! - Toggle per-page selection
//! - Download the selected pages as an image or a ZIP archive

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::MupdfRenderer;
use crate::error::{AppError, Result};
use crate::export::{export_selection, page_file_name, ExportPayload};
use crate::extract::{
    extract_pages, toggle_selection, Extraction, ExtractionConfig, OutputFormat, PageRecord,
};
use crate::state::AppState;

/// Matches the upload limit advertised to users (100 MB)
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Create the PDF router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract", post(extract_document))
        .route("/:id", get(get_extraction))
        .route("/:id/pages/:index", get(get_page_image))
        .route("/:id/pages/:index/toggle", post(toggle_page))
        .route("/:id/archive", get(download_archive))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Query parameters for extraction
#[derive(Debug, Deserialize)]
pub struct ExtractQuery {
    /// Output format (png, jpeg). Default: png
    pub format: Option<String>,
    /// Encoding quality as a fraction in (0, 1]. Ignored for PNG.
    pub quality: Option<f32>,
    /// Scale multiplier applied to native page dimensions
    pub scale: Option<f32>,
}

/// Summary of one extracted page
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub selected: bool,
}

impl From<&PageRecord> for PageSummary {
    fn from(record: &PageRecord) -> Self {
        Self {
            index: record.index,
            width: record.width,
            height: record.height,
            selected: record.selected,
        }
    }
}

/// Full extraction run response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub id: Uuid,
    pub file_name: String,
    pub format: OutputFormat,
    pub page_count: usize,
    pub pages: Vec<PageSummary>,
}

impl From<&Extraction> for ExtractionResponse {
    fn from(extraction: &Extraction) -> Self {
        Self {
            id: extraction.id,
            file_name: extraction.base_name.clone(),
            format: extraction.format,
            page_count: extraction.records.len(),
            pages: extraction.records.iter().map(PageSummary::from).collect(),
        }
    }
}

fn build_config(query: &ExtractQuery, state: &AppState) -> Result<ExtractionConfig> {
    let format = match query.format.as_deref() {
        None => OutputFormat::default(),
        Some(name) => OutputFormat::from_name(name)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown output format: {}", name)))?,
    };

    let defaults = &state.config().render;
    let quality = query.quality.unwrap_or(defaults.quality);
    if !(0.0..=1.0).contains(&quality) || quality == 0.0 {
        return Err(AppError::BadRequest(
            "quality must be a fraction in (0, 1]".to_string(),
        ));
    }

    Ok(ExtractionConfig {
        format,
        quality,
        scale: query.scale.unwrap_or(defaults.scale),
    })
}

/// Extract every page of an uploaded PDF
///
/// Expects a multipart body with a `file` field. Progress snapshots from
/// the pipeline are logged; the completed run is stored and returned.
async fn extract_document(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResponse>> {
    let config = build_config(&query, &state)?;

    let mut base_name = "document".to_string();
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            if let Some(name) = field.file_name() {
                base_name = name.trim_end_matches(".pdf").to_string();
            }
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
            data = Some(bytes.to_vec());
        }
    }

    let data = data.ok_or_else(|| AppError::BadRequest("Missing `file` field".to_string()))?;

    tracing::info!(file = %base_name, bytes = data.len(), "starting extraction");

    let renderer = MupdfRenderer::from_bytes(data)?;
    let records = extract_pages(&renderer, &config, |snapshot| {
        tracing::debug!(file = %base_name, pages = snapshot.len(), "extraction progress");
    })
    .await?;

    tracing::info!(file = %base_name, pages = records.len(), "extraction complete");

    let id = state
        .extractions()
        .insert(base_name, config.format, records);

    let response = state
        .extractions()
        .get(&id, |e| ExtractionResponse::from(e))
        .ok_or_else(|| AppError::Internal("extraction run vanished after insert".to_string()))?;

    Ok(Json(response))
}

/// Get a stored extraction run
async fn get_extraction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExtractionResponse>> {
    state
        .extractions()
        .get(&id, |e| ExtractionResponse::from(e))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Extraction run not found: {}", id)))
}

/// Download one extracted page image
async fn get_page_image(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Response> {
    let page = state
        .extractions()
        .get(&id, |extraction| {
            extraction
                .records
                .iter()
                .find(|r| r.index == index)
                .map(|r| {
                    (
                        r.data.clone(),
                        extraction.format,
                        page_file_name(&extraction.base_name, index, extraction.format),
                    )
                })
        })
        .ok_or_else(|| AppError::NotFound(format!("Extraction run not found: {}", id)))?;

    let (data, format, file_name) =
        page.ok_or_else(|| AppError::NotFound(format!("Page not found: {}", index)))?;

    Ok(download_response(data, format.mime(), &file_name))
}

/// Flip the selection flag on one page
async fn toggle_page(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<PageSummary>> {
    let summary = state
        .extractions()
        .modify(&id, |extraction| {
            toggle_selection(&mut extraction.records, index)?;
            extraction
                .records
                .iter()
                .find(|r| r.index == index)
                .map(PageSummary::from)
        })
        .ok_or_else(|| AppError::NotFound(format!("Extraction run not found: {}", id)))?;

    summary
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Page not found: {}", index)))
}

/// Download the selected pages: a single image, or a ZIP for several
async fn download_archive(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let export = state
        .extractions()
        .get(&id, |extraction| {
            export_selection(&extraction.base_name, &extraction.records, extraction.format)
        })
        .ok_or_else(|| AppError::NotFound(format!("Extraction run not found: {}", id)))?;

    let ExportPayload {
        file_name,
        content_type,
        data,
    } = export?;

    Ok(download_response(data, content_type, &file_name))
}

fn download_response(data: Vec<u8>, content_type: &'static str, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        data,
    )
        .into_response()
}
