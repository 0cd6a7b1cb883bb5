//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{ProviderKind, ServerConfig, SessionConfig, UpstreamConfig};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Upstream settings
    pub upstream: Option<UpstreamSettings>,
    /// Session credential settings
    pub session: Option<SessionSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
    /// Serve the browser UI
    pub ui_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    pub base_url: Option<String>,
    pub client_name: Option<String>,
    pub client_version: Option<String>,
    pub hl: Option<String>,
    pub user_agent: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    pub thumbnail_base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// none, visitor, static or remote
    pub provider: ProviderKind,
    pub minter_url: Option<String>,
    pub visitor_data: Option<String>,
    pub po_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let upstream = UpstreamConfig::default();
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_enabled: Some(true),
                ui_enabled: Some(true),
            },
            upstream: Some(UpstreamSettings {
                base_url: Some(upstream.base_url),
                client_name: Some(upstream.client_name),
                client_version: Some(upstream.client_version),
                hl: Some(upstream.hl),
                user_agent: None,
                timeout_secs: Some(upstream.timeout_secs),
                thumbnail_base: Some(upstream.thumbnail_base),
            }),
            session: Some(SessionSettings {
                provider: ProviderKind::Visitor,
                minter_url: None,
                visitor_data: None,
                po_token: None,
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = UpstreamConfig::default();
        let upstream = match self.upstream {
            Some(u) => UpstreamConfig {
                base_url: u.base_url.unwrap_or(defaults.base_url),
                client_name: u.client_name.unwrap_or(defaults.client_name),
                client_version: u.client_version.unwrap_or(defaults.client_version),
                hl: u.hl.unwrap_or(defaults.hl),
                user_agent: u.user_agent.unwrap_or(defaults.user_agent),
                timeout_secs: u.timeout_secs.unwrap_or(defaults.timeout_secs),
                thumbnail_base: u.thumbnail_base.unwrap_or(defaults.thumbnail_base),
            },
            None => defaults,
        };

        let session = self
            .session
            .map(|s| SessionConfig {
                provider: s.provider,
                minter_url: s.minter_url,
                visitor_data: s.visitor_data,
                po_token: s.po_token,
            })
            .unwrap_or_default();

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            ui_enabled: self.server.ui_enabled.unwrap_or(true),
            log_level: self
                .logging
                .as_ref()
                .map(|l| l.level.clone())
                .unwrap_or_else(|| "info".to_string()),
            log_format: self
                .logging
                .and_then(|l| l.format)
                .unwrap_or_else(|| "pretty".to_string()),
            upstream,
            session,
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
