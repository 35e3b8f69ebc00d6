//! TikTok lookup via a tikwm-compatible API
//!
//! The service returns `code == 0` with a payload on success; any non-zero
//! code means the URL did not resolve to a video or photo post. Photo posts
//! carry an image set instead of a playable URL; those can be bundled into
//! a ZIP archive for download.

use std::io::{Cursor, Write};

use serde::Deserialize;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{MediaDescriptor, MediaError};

/// Client for a tikwm-compatible lookup endpoint
pub struct TikwmClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct TikwmResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<TikwmData>,
}

#[derive(Debug, Deserialize)]
struct TikwmData {
    play: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    title: Option<String>,
    cover: Option<String>,
    author: Option<TikwmAuthor>,
}

#[derive(Debug, Deserialize)]
struct TikwmAuthor {
    nickname: Option<String>,
}

impl TikwmClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a TikTok URL to a no-watermark media descriptor
    pub async fn lookup(&self, video_url: &str) -> Result<MediaDescriptor, MediaError> {
        let url = format!("{}/api/", self.endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[("url", video_url)])
            .send()
            .await?;

        let body: TikwmResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Unavailable(format!("unexpected lookup response: {}", e)))?;

        descriptor_from_response(body)
    }

    /// Download a photo post's image set and bundle it into a ZIP archive
    ///
    /// Images are fetched one at a time, in order, and stored as
    /// `tiktok_photos/photo_{n}.jpg` with 1-based numbering. Returns the
    /// archive file name and bytes.
    pub async fn photo_archive(
        &self,
        descriptor: &MediaDescriptor,
    ) -> Result<(String, Vec<u8>), MediaError> {
        if descriptor.images.is_empty() {
            return Err(MediaError::NotFound(
                "post has no photo set to archive".to_string(),
            ));
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for (position, image_url) in descriptor.images.iter().enumerate() {
            let bytes = self.http.get(image_url).send().await?.bytes().await?;
            writer
                .start_file(format!("tiktok_photos/photo_{}.jpg", position + 1), options)
                .map_err(|e| MediaError::Unavailable(e.to_string()))?;
            writer
                .write_all(&bytes)
                .map_err(|e| MediaError::Unavailable(e.to_string()))?;
        }

        let data = writer
            .finish()
            .map_err(|e| MediaError::Unavailable(e.to_string()))?
            .into_inner();
        let name = format!("TikTok_Photos_{}.zip", chrono::Utc::now().timestamp());
        Ok((name, data))
    }
}

fn descriptor_from_response(response: TikwmResponse) -> Result<MediaDescriptor, MediaError> {
    if response.code != 0 {
        let msg = if response.msg.is_empty() {
            "video not found or link not supported".to_string()
        } else {
            response.msg
        };
        return Err(MediaError::NotFound(msg));
    }

    let data = response
        .data
        .ok_or_else(|| MediaError::Unavailable("lookup response missing payload".to_string()))?;

    Ok(MediaDescriptor {
        title: data.title,
        author: data.author.and_then(|a| a.nickname),
        cover: data.cover,
        play_url: data.play,
        images: data.images,
        formats: Vec::new(),
    })
}
