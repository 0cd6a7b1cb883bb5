//! YouTube extraction
//!
//! This module talks to the InnerTube player API:
//! - Player responses (title, thumbnails, caption tracks, stream manifests)
//! - Timed-text transcripts in json3 form
//! - Player script discovery and signature deciphering
//! - One memoized upstream session per process

pub mod cipher;
pub mod client;
pub mod innertube;
pub mod player;
pub mod transcript;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::video_id::VideoId;

pub use client::YouTubeClient;
pub use types::{CaptionSegment, CaptionTrack, StreamFormat, StreamingData, VideoInfo};

/// Source of video metadata, transcripts and stream URLs
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Fetch metadata, caption tracks and stream manifests.
    async fn video_info(&self, video_id: &VideoId) -> Result<VideoInfo>;

    /// Fetch the ordered segments of one caption track.
    async fn transcript(&self, track: &CaptionTrack) -> Result<Vec<CaptionSegment>>;

    /// Resolve a `signatureCipher` into a playable URL.
    async fn decipher(&self, signature_cipher: &str) -> Result<String>;
}
