//! Test fixtures for integration tests
//!
//! Provides a canned video source so the HTTP layer can be exercised
//! without network access.

use async_trait::async_trait;

use crate::error::{ExtractError, Result};
use crate::video_id::VideoId;
use crate::youtube::types::Thumbnail;
use crate::youtube::{
    CaptionSegment, CaptionTrack, StreamFormat, StreamingData, VideoInfo, VideoSource,
};

pub const VIDEO_ID: &str = "dQw4w9WgXcQ";

/// Canned video source
#[derive(Debug, Clone)]
pub struct FakeSource {
    pub info: VideoInfo,
    pub segments: Vec<CaptionSegment>,
    /// When set, every call fails with an upstream error
    pub fail_status: Option<u16>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            info: demo_info(),
            segments: demo_segments(12),
            fail_status: None,
        }
    }
}

impl FakeSource {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        match self.fail_status {
            Some(status) => Err(ExtractError::UpstreamStatus {
                status,
                url: "https://upstream.test/youtubei/v1/player".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VideoSource for FakeSource {
    async fn video_info(&self, video_id: &VideoId) -> Result<VideoInfo> {
        self.check()?;
        Ok(VideoInfo {
            video_id: video_id.to_string(),
            ..self.info.clone()
        })
    }

    async fn transcript(&self, _track: &CaptionTrack) -> Result<Vec<CaptionSegment>> {
        self.check()?;
        Ok(self.segments.clone())
    }

    async fn decipher(&self, signature_cipher: &str) -> Result<String> {
        self.check()?;
        if signature_cipher.starts_with("s=") {
            Ok(format!("https://rr.test/videoplayback?itag=deciphered&{}", signature_cipher))
        } else {
            Err(ExtractError::Decipher("unsupported cipher".to_string()))
        }
    }
}

pub fn track(code: &str, name: &str, kind: Option<&str>) -> CaptionTrack {
    CaptionTrack {
        language_code: code.to_string(),
        name: Some(name.to_string()),
        kind: kind.map(str::to_string),
        base_url: format!("https://upstream.test/api/timedtext?v={}&lang={}", VIDEO_ID, code),
        is_translatable: true,
    }
}

pub fn demo_info() -> VideoInfo {
    VideoInfo {
        video_id: VIDEO_ID.to_string(),
        title: Some("Demo Video".to_string()),
        thumbnails: vec![Thumbnail {
            url: "https://i.ytimg.test/vi/dQw4w9WgXcQ/hq720.jpg".to_string(),
            width: 1280,
            height: 720,
        }],
        captions: vec![
            track("en", "English", None),
            track("ko", "Korean (auto-generated)", Some("asr")),
        ],
        streaming: StreamingData {
            formats: vec![
                StreamFormat {
                    itag: 18,
                    url: Some("https://rr.test/videoplayback?itag=18".to_string()),
                    mime_type: Some("video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"".to_string()),
                    quality: Some("medium".to_string()),
                    quality_label: Some("360p".to_string()),
                    content_length: Some(3 * 1048576),
                    ..Default::default()
                },
                StreamFormat {
                    itag: 22,
                    signature_cipher: Some("broken".to_string()),
                    mime_type: Some("video/mp4".to_string()),
                    quality_label: Some("720p".to_string()),
                    ..Default::default()
                },
            ],
            adaptive_formats: vec![
                StreamFormat {
                    itag: 137,
                    url: Some("https://rr.test/videoplayback?itag=137".to_string()),
                    mime_type: Some("video/mp4; codecs=\"avc1.640028\"".to_string()),
                    quality_label: Some("1080p".to_string()),
                    ..Default::default()
                },
                StreamFormat {
                    itag: 251,
                    signature_cipher: Some("s=abc&url=https%3A%2F%2Frr.test".to_string()),
                    mime_type: Some("audio/webm; codecs=\"opus\"".to_string()),
                    audio_quality: Some("AUDIO_QUALITY_MEDIUM".to_string()),
                    ..Default::default()
                },
            ],
        },
    }
}

pub fn demo_segments(count: usize) -> Vec<CaptionSegment> {
    (0..count)
        .map(|i| {
            let start = i as f64 * 2.5;
            CaptionSegment::new(start, start + 2.0, format!("Line {}", i + 1))
        })
        .collect()
}
