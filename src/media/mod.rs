//! Media lookup collaborators
//!
//! Black-box HTTP endpoints consumed with a narrow contract: URL in, media
//! descriptor out. TikTok lookups go through a tikwm-compatible API;
//! YouTube lookups construct links to an external conversion service
//! without any network call.

pub mod tiktok;
pub mod youtube;

use serde::Serialize;
use thiserror::Error;

pub use tiktok::TikwmClient;

#[derive(Debug, Error)]
pub enum MediaError {
    /// Input URL is not a recognizable media link
    #[error("Invalid media URL: {0}")]
    InvalidUrl(String),

    /// Lookup service answered but found nothing for the URL
    #[error("Media not found: {0}")]
    NotFound(String),

    /// Lookup service unreachable or returned an unusable response.
    /// Surfaced to the caller as-is; no automatic retry.
    #[error("Media service unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for MediaError {
    fn from(err: reqwest::Error) -> Self {
        MediaError::Unavailable(err.to_string())
    }
}

/// What a lookup resolved: playable URL and/or image set, plus display
/// metadata and any conversion links
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<FormatLink>,
}

/// One downloadable rendition offered by the conversion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatLink {
    pub quality: String,
    pub url: String,
    pub kind: FormatKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Video,
    Audio,
}
