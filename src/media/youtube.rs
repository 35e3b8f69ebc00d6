//! YouTube conversion-link construction
//!
//! No network calls here: the video id is parsed out of the input URL and
//! the descriptor points at an external MP4/MP3 conversion service plus the
//! public thumbnail host. The links are deterministic functions of the
//! video id and the configured converter endpoint.

use url::Url;

use super::{FormatKind, FormatLink, MediaDescriptor, MediaError};

/// Extract the video id from the usual YouTube URL shapes
///
/// Accepts `youtube.com/watch?v=<id>`, `youtu.be/<id>`, and
/// `youtube.com/shorts/<id>` or `/embed/<id>`, with or without a scheme.
pub fn parse_video_id(input: &str) -> Option<String> {
    let parsed = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{}", input)))
        .ok()?;

    let host = parsed
        .host_str()?
        .trim_start_matches("www.")
        .trim_start_matches("m.");

    let id = match host {
        "youtu.be" => parsed.path_segments()?.next().map(str::to_string),
        "youtube.com" => {
            if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
                Some(v.into_owned())
            } else {
                let mut segments = parsed.path_segments()?;
                match segments.next()? {
                    "shorts" | "embed" => segments.next().map(str::to_string),
                    _ => None,
                }
            }
        }
        _ => None,
    };

    id.filter(|id| !id.is_empty())
}

/// Build the conversion links offered for a video id
pub fn conversion_links(converter_endpoint: &str, video_id: &str) -> Vec<FormatLink> {
    let endpoint = converter_endpoint.trim_end_matches('/');
    vec![
        FormatLink {
            quality: "720p (MP4)".to_string(),
            url: format!("{}/mp4/{}", endpoint, video_id),
            kind: FormatKind::Video,
        },
        FormatLink {
            quality: "1080p (MP4)".to_string(),
            url: format!("{}/mp4/{}", endpoint, video_id),
            kind: FormatKind::Video,
        },
        FormatLink {
            quality: "Audio (MP3)".to_string(),
            url: format!("{}/mp3/{}", endpoint, video_id),
            kind: FormatKind::Audio,
        },
    ]
}

/// Resolve a YouTube URL to a descriptor with conversion links
pub fn lookup(converter_endpoint: &str, input_url: &str) -> Result<MediaDescriptor, MediaError> {
    let video_id =
        parse_video_id(input_url).ok_or_else(|| MediaError::InvalidUrl(input_url.to_string()))?;

    Ok(MediaDescriptor {
        title: Some(format!("YouTube video {}", video_id)),
        author: None,
        cover: Some(format!(
            "https://img.youtube.com/vi/{}/maxresdefault.jpg",
            video_id
        )),
        play_url: None,
        images: Vec::new(),
        formats: conversion_links(converter_endpoint, &video_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_urls() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            parse_video_id("https://youtube.com/watch?v=abc123&t=42s").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn parses_short_link_and_shorts_urls() {
        assert_eq!(
            parse_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/shorts/xyz789").as_deref(),
            Some("xyz789")
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/embed/xyz789").as_deref(),
            Some("xyz789")
        );
    }

    #[test]
    fn parses_scheme_less_input() {
        assert_eq!(
            parse_video_id("youtube.com/watch?v=abc123").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn rejects_non_youtube_hosts_and_empty_ids() {
        assert_eq!(parse_video_id("https://vimeo.com/12345"), None);
        assert_eq!(parse_video_id("https://youtube.com/"), None);
        assert_eq!(parse_video_id("https://youtu.be/"), None);
        assert_eq!(parse_video_id("not a url at all %%%"), None);
    }

    #[test]
    fn conversion_links_are_deterministic() {
        let first = conversion_links("https://convert.example/apis/button", "abc123");
        let second = conversion_links("https://convert.example/apis/button", "abc123");
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].url, "https://convert.example/apis/button/mp4/abc123");
        assert_eq!(first[2].url, "https://convert.example/apis/button/mp3/abc123");
        assert_eq!(first[2].kind, FormatKind::Audio);
    }

    #[test]
    fn lookup_builds_cover_and_formats() {
        let descriptor = lookup("https://convert.example", "https://youtu.be/abc123").unwrap();
        assert_eq!(
            descriptor.cover.as_deref(),
            Some("https://img.youtube.com/vi/abc123/maxresdefault.jpg")
        );
        assert_eq!(descriptor.formats.len(), 3);
        assert!(descriptor.play_url.is_none());
    }

    #[test]
    fn invalid_link_is_an_invalid_url_error() {
        let result = lookup("https://convert.example", "https://vimeo.com/1");
        assert!(matches!(result, Err(MediaError::InvalidUrl(_))));
    }
}
