//! Media lookup API endpoints
//!
//! TikTok lookups proxy a tikwm-compatible API; YouTube lookups construct
//! conversion links locally. Lookup failures surface as a single error
//! response with no retry.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::media::{youtube, MediaDescriptor};
use crate::state::AppState;

/// Create the media router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tiktok", get(tiktok_lookup))
        .route("/tiktok/photos", get(tiktok_photo_archive))
        .route("/youtube", get(youtube_lookup))
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub url: String,
}

/// Resolve a TikTok URL to a no-watermark media descriptor
async fn tiktok_lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<MediaDescriptor>> {
    let descriptor = state.tikwm().lookup(&query.url).await?;
    Ok(Json(descriptor))
}

/// Download a TikTok photo post's image set as a ZIP archive
async fn tiktok_photo_archive(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Response> {
    let descriptor = state.tikwm().lookup(&query.url).await?;
    let (file_name, data) = state.tikwm().photo_archive(&descriptor).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        data,
    )
        .into_response())
}

/// Build conversion links for a YouTube URL
async fn youtube_lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<MediaDescriptor>> {
    let descriptor = youtube::lookup(&state.config().media.converter_endpoint, &query.url)?;
    Ok(Json(descriptor))
}
