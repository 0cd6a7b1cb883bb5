//! Caption extraction and formatting
//!
//! - Track lookup by language code
//! - SRT / WebVTT / plain-text rendering
//! - Short previews for the UI

pub mod format;
pub mod preview;

use crate::error::{ExtractError, Result};
use crate::video_id::VideoId;
use crate::youtube::{CaptionSegment, CaptionTrack, VideoInfo, VideoSource};

pub use format::{render, CaptionFormat};
pub use preview::{preview, CaptionPreview};

/// A caption track resolved for one video, with its segments
#[derive(Debug, Clone)]
pub struct ResolvedCaption {
    pub info: VideoInfo,
    pub track: CaptionTrack,
    pub segments: Vec<CaptionSegment>,
}

/// Look up a language's track and fetch its segments.
pub async fn fetch_caption(
    source: &dyn VideoSource,
    video_id: &VideoId,
    language_code: &str,
) -> Result<ResolvedCaption> {
    let info = source.video_info(video_id).await?;
    let track = info
        .caption_track(language_code)
        .cloned()
        .ok_or_else(|| ExtractError::CaptionNotFound(language_code.to_string()))?;

    let segments = source.transcript(&track).await?;
    tracing::debug!(
        "Fetched {} segments for {} ({})",
        segments.len(),
        video_id,
        language_code
    );

    Ok(ResolvedCaption {
        info,
        track,
        segments,
    })
}
