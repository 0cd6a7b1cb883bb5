//! Stream listing
//!
//! Projects the progressive manifest (audio+video in one file) and the
//! audio-only part of the adaptive manifest into downloadable entries.
//! Entries whose URL cannot be resolved are dropped, not reported.

use serde::Serialize;

use crate::youtube::{StreamFormat, StreamingData, VideoSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamEntry {
    #[serde(rename = "type")]
    pub kind: StreamKind,
    pub quality: String,
    pub url: String,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub size: Option<String>,
}

/// Human-readable size in binary megabytes, one decimal place.
pub fn format_size(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn video_quality(format: &StreamFormat) -> String {
    format
        .quality_label
        .clone()
        .or_else(|| format.quality.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

fn audio_quality(format: &StreamFormat) -> String {
    format
        .audio_quality
        .clone()
        .or_else(|| {
            format
                .bitrate
                .map(|b| format!("{}kbps", (b as f64 / 1000.0).round() as u64))
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Literal URL when present, else decipher; None when neither works.
async fn resolve_url(source: &dyn VideoSource, format: &StreamFormat) -> Option<String> {
    let url = match (&format.url, &format.signature_cipher) {
        (Some(url), _) => Some(url.clone()),
        (None, Some(cipher)) => match source.decipher(cipher).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!("Dropping itag {}: {}", format.itag, e);
                None
            }
        },
        (None, None) => None,
    };
    url.filter(|u| !u.is_empty())
}

/// List downloadable streams in manifest order.
pub async fn list_streams(source: &dyn VideoSource, streaming: &StreamingData) -> Vec<StreamEntry> {
    let mut streams = Vec::new();

    for format in &streaming.formats {
        if let Some(url) = resolve_url(source, format).await {
            streams.push(StreamEntry {
                kind: StreamKind::Video,
                quality: video_quality(format),
                url,
                mime_type: format.mime_type.clone(),
                size: format.content_length.map(format_size),
            });
        }
    }

    for format in streaming.adaptive_formats.iter().filter(|f| f.is_audio()) {
        if let Some(url) = resolve_url(source, format).await {
            streams.push(StreamEntry {
                kind: StreamKind::Audio,
                quality: audio_quality(format),
                url,
                mime_type: format.mime_type.clone(),
                size: format.content_length.map(format_size),
            });
        }
    }

    streams
}
