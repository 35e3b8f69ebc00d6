//! Error types for the toolbox server
//!
//! Every failure is terminal to its operation: one error response, no
//! retry, and previously stored extraction runs stay untouched.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentError;
use crate::export::ExportError;
use crate::media::MediaError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Document(e) => match e {
                DocumentError::Read(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "unreadable_document",
                    format!("Could not read the uploaded document: {}", msg),
                ),
                DocumentError::PageNotFound(index) => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("Page not found: {}", index),
                ),
                DocumentError::Render(msg) | DocumentError::Encode(msg) => {
                    tracing::error!("Extraction failed: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "extraction_failed",
                        "Page extraction failed".to_string(),
                    )
                }
            },
            AppError::Media(e) => match e {
                MediaError::InvalidUrl(url) => (
                    StatusCode::BAD_REQUEST,
                    "invalid_url",
                    format!("Not a recognizable media link: {}", url),
                ),
                MediaError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
                MediaError::Unavailable(msg) => {
                    tracing::warn!("Media lookup service failed: {}", msg);
                    (
                        StatusCode::BAD_GATEWAY,
                        "lookup_unavailable",
                        "Media lookup service is unavailable".to_string(),
                    )
                }
            },
            AppError::Export(e) => match e {
                ExportError::NoSelection => (
                    StatusCode::BAD_REQUEST,
                    "no_selection",
                    "No pages selected for export".to_string(),
                ),
                ExportError::Archive(msg) => {
                    tracing::error!("Archive creation failed: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "archive_failed",
                        "Archive creation failed".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
