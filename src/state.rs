//! Application state management
//!
//! This module defines the AppState structure that holds:
//! - Server configuration
//! - The video source (InnerTube client with its memoized session)

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::session::build_provider;
use crate::youtube::client::build_http_client;
use crate::youtube::{VideoSource, YouTubeClient};

/// Application state shared across all handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Where video metadata, transcripts and stream URLs come from
    pub source: Arc<dyn VideoSource>,
}

impl AppState {
    /// Create a new AppState with an explicit video source
    pub fn new(config: ServerConfig, source: Arc<dyn VideoSource>) -> Self {
        Self { config, source }
    }

    /// Create AppState backed by the YouTube client
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let http = build_http_client(&config.upstream)?;
        let credentials = build_provider(&config.session, http.clone())?;
        let client = YouTubeClient::new(config.upstream.clone(), http, credentials);
        Ok(Self::new(config, Arc::new(client)))
    }
}
