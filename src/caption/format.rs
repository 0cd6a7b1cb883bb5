//! Caption formatting (SRT, WebVTT, plain text)

use std::str::FromStr;

use crate::error::ExtractError;
use crate::youtube::types::CaptionSegment;

/// Output format for caption downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionFormat {
    #[default]
    Srt,
    Vtt,
    Txt,
}

impl CaptionFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CaptionFormat::Srt => "srt",
            CaptionFormat::Vtt => "vtt",
            CaptionFormat::Txt => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            CaptionFormat::Srt => "application/x-subrip; charset=utf-8",
            CaptionFormat::Vtt => "text/vtt; charset=utf-8",
            CaptionFormat::Txt => "text/plain; charset=utf-8",
        }
    }

    pub fn filename(&self) -> String {
        format!("subtitle.{}", self.extension())
    }
}

impl FromStr for CaptionFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "srt" => Ok(CaptionFormat::Srt),
            "vtt" => Ok(CaptionFormat::Vtt),
            "txt" => Ok(CaptionFormat::Txt),
            _ => Err(ExtractError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Format seconds as `HH:MM:SS<sep>mmm`.
///
/// Rounds to whole milliseconds. Hours are not capped.
pub fn format_timestamp(seconds: f64, separator: char) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
        separator,
        ms
    )
}

/// Render segments in the requested format, in source order.
pub fn render(segments: &[CaptionSegment], format: CaptionFormat) -> String {
    let mut out = String::new();
    match format {
        CaptionFormat::Srt => {
            for (i, seg) in segments.iter().enumerate() {
                out.push_str(&format!(
                    "{}\n{} --> {}\n{}\n\n",
                    i + 1,
                    format_timestamp(seg.start, ','),
                    format_timestamp(seg.end, ','),
                    seg.text()
                ));
            }
        }
        CaptionFormat::Vtt => {
            out.push_str("WEBVTT\n\n");
            for seg in segments {
                out.push_str(&format!(
                    "{} --> {}\n{}\n\n",
                    format_timestamp(seg.start, '.'),
                    format_timestamp(seg.end, '.'),
                    seg.text()
                ));
            }
        }
        CaptionFormat::Txt => {
            for seg in segments {
                out.push_str(seg.text());
                out.push('\n');
            }
        }
    }
    out
}
