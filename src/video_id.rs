//! Video identifier resolution
//!
//! Pulls the 11-character video id out of a free-form YouTube URL.
//! Watch (`v=`), short (`youtu.be/`), embed and plain path shapes are
//! accepted; anything else is rejected rather than repaired.

use std::fmt;
use std::str::FromStr;

use crate::error::{ExtractError, Result};

/// An 11-character YouTube video id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Extract the video id from a URL.
    pub fn parse(url: &str) -> Result<Self> {
        regex!(r"(?:v=|/|be/|embed/)([a-zA-Z0-9_-]{11})")
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
            .ok_or_else(|| ExtractError::InvalidUrl(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Thumbnail URL used when the player response carries none.
    pub fn fallback_thumbnail(&self, thumbnail_base: &str) -> String {
        format!(
            "{}/vi/{}/maxresdefault.jpg",
            thumbnail_base.trim_end_matches('/'),
            self.0
        )
    }
}

impl FromStr for VideoId {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        VideoId::parse(s)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
