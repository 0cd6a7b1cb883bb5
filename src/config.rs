//! Server configuration

use serde::{Deserialize, Serialize};

/// Upstream (InnerTube) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the YouTube web frontend
    pub base_url: String,

    /// InnerTube client name sent in the request context
    pub client_name: String,

    /// InnerTube client version sent in the request context
    pub client_version: String,

    /// Interface language
    pub hl: String,

    /// User-Agent header for all upstream requests
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Base URL for fallback thumbnails
    pub thumbnail_base: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            client_name: "WEB".to_string(),
            client_version: "2.20240726.00.00".to_string(),
            hl: "en".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
                .to_string(),
            timeout_secs: 30,
            thumbnail_base: "https://img.youtube.com".to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Numeric id sent in `X-Youtube-Client-Name` for the configured client.
    pub fn client_name_id(&self) -> Option<u32> {
        match self.client_name.as_str() {
            "WEB" => Some(1),
            "MWEB" => Some(2),
            "ANDROID" => Some(3),
            "IOS" => Some(5),
            "TVHTML5" => Some(7),
            "WEB_EMBEDDED_PLAYER" => Some(56),
            _ => None,
        }
    }
}

/// Where session credentials come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anonymous requests, no visitor data and no token
    None,
    /// Locally synthesized visitor data, no token
    Visitor,
    /// Visitor data and token taken from the configuration
    Static,
    /// Token minted by an external service
    Remote,
}

/// Session credential configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Credential provider
    pub provider: ProviderKind,

    /// Token minting service endpoint (remote provider)
    pub minter_url: Option<String>,

    /// Visitor data (static provider)
    pub visitor_data: Option<String>,

    /// PO token (static provider)
    pub po_token: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Visitor,
            minter_url: None,
            visitor_data: None,
            po_token: None,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Serve the browser UI at /ui
    pub ui_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// Upstream configuration
    pub upstream: UpstreamConfig,

    /// Session credential configuration
    pub session: SessionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_enabled: true,
            ui_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            upstream: UpstreamConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the configuration for combinations that cannot work
    pub fn validate(&self) -> Result<(), String> {
        let base = &self.upstream.base_url;
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err("Upstream base URL must start with http:// or https://".to_string());
        }

        if self.upstream.timeout_secs == 0 {
            return Err("Upstream timeout must be at least one second".to_string());
        }

        match self.session.provider {
            ProviderKind::Remote if self.session.minter_url.is_none() => {
                Err("Remote session provider requires minter_url".to_string())
            }
            ProviderKind::Static if self.session.visitor_data.is_none() => {
                Err("Static session provider requires visitor_data".to_string())
            }
            _ => Ok(()),
        }
    }
}
