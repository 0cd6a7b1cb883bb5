//! Intermediate value types
//!
//! Upstream responses are deeply nested and almost every field is optional.
//! They are converted into these types at the client boundary so the
//! formatting and projection code never has to dig through raw JSON.

use crate::video_id::VideoId;

/// Video metadata and manifests for one video
#[derive(Debug, Clone, Default)]
pub struct VideoInfo {
    pub video_id: String,
    pub title: Option<String>,
    /// Thumbnails, widest first
    pub thumbnails: Vec<Thumbnail>,
    pub captions: Vec<CaptionTrack>,
    pub streaming: StreamingData,
}

impl VideoInfo {
    /// Title, or "Unknown" when the response carries none.
    pub fn title_or_unknown(&self) -> String {
        self.title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// First available thumbnail, else the constructed fallback.
    pub fn thumbnail_or_fallback(&self, video_id: &VideoId, thumbnail_base: &str) -> String {
        self.thumbnails
            .first()
            .map(|t| t.url.clone())
            .unwrap_or_else(|| video_id.fallback_thumbnail(thumbnail_base))
    }

    /// Find the caption track for a language code.
    pub fn caption_track(&self, language_code: &str) -> Option<&CaptionTrack> {
        self.captions
            .iter()
            .find(|t| t.language_code == language_code)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// One language's subtitle stream
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub name: Option<String>,
    /// "asr" for auto-generated tracks
    pub kind: Option<String>,
    pub base_url: String,
    pub is_translatable: bool,
}

impl CaptionTrack {
    pub fn is_auto_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    /// Human-readable label: the track name, else the raw code.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.language_code.clone())
    }
}

/// One timed caption entry. Times are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    pub start: f64,
    pub end: f64,
    pub text: Option<String>,
}

impl CaptionSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: Some(text.into()),
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// The two stream manifests of a video
#[derive(Debug, Clone, Default)]
pub struct StreamingData {
    /// Progressive formats, audio and video in one file
    pub formats: Vec<StreamFormat>,
    /// Adaptive formats, one media type each
    pub adaptive_formats: Vec<StreamFormat>,
}

/// One manifest entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamFormat {
    pub itag: u32,
    pub url: Option<String>,
    pub signature_cipher: Option<String>,
    pub mime_type: Option<String>,
    pub quality: Option<String>,
    pub quality_label: Option<String>,
    pub audio_quality: Option<String>,
    pub bitrate: Option<u64>,
    pub content_length: Option<u64>,
}

impl StreamFormat {
    pub fn is_audio(&self) -> bool {
        self.mime_type
            .as_deref()
            .map(|m| m.contains("audio"))
            .unwrap_or(false)
    }
}
