//! Raw InnerTube player response shapes
//!
//! Only the fields this service reads are modelled. Everything is optional
//! upstream, so everything is optional here; [`PlayerResponse::into_video_info`]
//! is the single place where defaults are applied.

use serde::Deserialize;

use crate::error::{ExtractError, Result};
use crate::youtube::types::{
    CaptionTrack, StreamFormat, StreamingData, Thumbnail, VideoInfo,
};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub video_details: Option<RawVideoDetails>,
    pub captions: Option<RawCaptions>,
    pub streaming_data: Option<RawStreamingData>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoDetails {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<RawThumbnails>,
}

#[derive(Debug, Deserialize)]
pub struct RawThumbnails {
    #[serde(default)]
    pub thumbnails: Vec<RawThumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct RawThumbnail {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct RawCaptions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    pub renderer: Option<RawTracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTracklist {
    #[serde(default)]
    pub caption_tracks: Vec<RawCaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCaptionTrack {
    pub base_url: String,
    pub name: Option<RawText>,
    pub language_code: String,
    pub kind: Option<String>,
    pub is_translatable: Option<bool>,
}

/// Either `{"simpleText": ..}` or `{"runs": [{"text": ..}]}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawText {
    pub simple_text: Option<String>,
    pub runs: Option<Vec<RawRun>>,
}

#[derive(Debug, Deserialize)]
pub struct RawRun {
    pub text: String,
}

impl RawText {
    pub fn text(&self) -> Option<String> {
        if let Some(text) = &self.simple_text {
            return Some(text.clone());
        }
        self.runs
            .as_ref()
            .map(|runs| runs.iter().map(|r| r.text.as_str()).collect::<String>())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStreamingData {
    #[serde(default)]
    pub formats: Vec<RawFormat>,
    #[serde(default)]
    pub adaptive_formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFormat {
    pub itag: u32,
    pub url: Option<String>,
    pub signature_cipher: Option<String>,
    /// Older responses use `cipher` instead of `signatureCipher`
    pub cipher: Option<String>,
    pub mime_type: Option<String>,
    pub bitrate: Option<u64>,
    pub quality: Option<String>,
    pub quality_label: Option<String>,
    pub audio_quality: Option<String>,
    /// Byte length, sent as a decimal string
    pub content_length: Option<String>,
}

impl From<RawFormat> for StreamFormat {
    fn from(raw: RawFormat) -> Self {
        StreamFormat {
            itag: raw.itag,
            url: raw.url.filter(|u| !u.is_empty()),
            signature_cipher: raw.signature_cipher.or(raw.cipher),
            mime_type: raw.mime_type,
            quality: raw.quality,
            quality_label: raw.quality_label,
            audio_quality: raw.audio_quality,
            bitrate: raw.bitrate,
            content_length: raw.content_length.and_then(|l| l.parse().ok()),
        }
    }
}

impl From<RawCaptionTrack> for CaptionTrack {
    fn from(raw: RawCaptionTrack) -> Self {
        CaptionTrack {
            name: raw.name.and_then(|n| n.text()),
            language_code: raw.language_code,
            kind: raw.kind,
            base_url: raw.base_url,
            is_translatable: raw.is_translatable.unwrap_or(false),
        }
    }
}

impl PlayerResponse {
    /// Convert into the intermediate representation.
    ///
    /// A non-OK playability status is only fatal when the response carries
    /// no video details at all.
    pub fn into_video_info(self, video_id: &str) -> Result<VideoInfo> {
        if let Some(status) = &self.playability_status {
            let code = status.status.as_deref().unwrap_or("UNKNOWN");
            if code != "OK" && self.video_details.is_none() {
                return Err(ExtractError::Unplayable {
                    status: code.to_string(),
                    reason: status.reason.clone().unwrap_or_default(),
                });
            }
        }

        let (title, mut thumbnails) = match self.video_details {
            Some(details) => (
                details.title,
                details
                    .thumbnail
                    .map(|t| t.thumbnails)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|t| Thumbnail {
                        url: t.url,
                        width: t.width,
                        height: t.height,
                    })
                    .collect::<Vec<_>>(),
            ),
            None => (None, Vec::new()),
        };
        // Stable sort keeps upstream order between equal widths.
        thumbnails.sort_by(|a, b| b.width.cmp(&a.width));

        let captions = self
            .captions
            .and_then(|c| c.renderer)
            .map(|r| r.caption_tracks)
            .unwrap_or_default()
            .into_iter()
            .map(CaptionTrack::from)
            .collect();

        let streaming = self
            .streaming_data
            .map(|s| StreamingData {
                formats: s.formats.into_iter().map(StreamFormat::from).collect(),
                adaptive_formats: s
                    .adaptive_formats
                    .into_iter()
                    .map(StreamFormat::from)
                    .collect(),
            })
            .unwrap_or_default();

        Ok(VideoInfo {
            video_id: video_id.to_string(),
            title,
            thumbnails,
            captions,
            streaming,
        })
    }
}
