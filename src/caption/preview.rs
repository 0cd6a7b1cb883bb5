//! Caption preview

use serde::Serialize;

use super::format::format_timestamp;
use super::ResolvedCaption;

/// Maximum number of lines in a preview
pub const PREVIEW_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewLine {
    pub time: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptionPreview {
    pub video_title: String,
    pub language: String,
    pub preview: Vec<PreviewLine>,
}

/// First lines of a caption track with their start times.
pub fn preview(caption: &ResolvedCaption) -> CaptionPreview {
    CaptionPreview {
        video_title: caption.info.title_or_unknown(),
        language: caption.track.label(),
        preview: caption
            .segments
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|seg| PreviewLine {
                time: format_timestamp(seg.start, ','),
                text: seg.text().to_string(),
            })
            .collect(),
    }
}
