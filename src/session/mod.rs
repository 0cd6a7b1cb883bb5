//! Session credentials
//!
//! The upstream player API wants a visitor id and, increasingly, a
//! proof-of-origin token before it serves captions and streams to an
//! anonymous client. Everything about how those are obtained is hidden
//! behind [`CredentialsProvider`]:
//! - `none`: anonymous requests
//! - `visitor`: locally synthesized visitor id
//! - `static`: values from the configuration file
//! - `remote`: token minted by an external service
//!
//! Providers fail loudly. A provider error fails session bootstrap and
//! surfaces to the request that triggered it; no provider silently
//! substitutes an empty token.

pub mod encoding;
pub mod minter;
pub mod visitor;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ProviderKind, SessionConfig};
use crate::error::{ExtractError, Result};

/// Visitor id plus optional token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionCredentials {
    pub session_id: Option<String>,
    pub token: Option<String>,
}

#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn acquire_session_credentials(&self) -> Result<SessionCredentials>;
}

pub struct NoCredentials;

#[async_trait]
impl CredentialsProvider for NoCredentials {
    async fn acquire_session_credentials(&self) -> Result<SessionCredentials> {
        Ok(SessionCredentials::default())
    }
}

pub struct StaticCredentials(SessionCredentials);

impl StaticCredentials {
    pub fn new(session_id: String, token: Option<String>) -> Result<Self> {
        let token = token
            .map(|t| encoding::base64_to_bytes(&t).map(|b| encoding::bytes_to_base64(&b, true)))
            .transpose()?;
        Ok(Self(SessionCredentials {
            session_id: Some(session_id),
            token,
        }))
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentials {
    async fn acquire_session_credentials(&self) -> Result<SessionCredentials> {
        Ok(self.0.clone())
    }
}

/// Build the provider selected in the configuration.
pub fn build_provider(
    config: &SessionConfig,
    http: reqwest::Client,
) -> Result<Arc<dyn CredentialsProvider>> {
    let provider: Arc<dyn CredentialsProvider> = match config.provider {
        ProviderKind::None => Arc::new(NoCredentials),
        ProviderKind::Visitor => Arc::new(visitor::VisitorProvider),
        ProviderKind::Static => {
            let session_id = config.visitor_data.clone().ok_or_else(|| {
                ExtractError::Config("static session provider requires visitor_data".to_string())
            })?;
            Arc::new(StaticCredentials::new(session_id, config.po_token.clone())?)
        }
        ProviderKind::Remote => {
            let url = config.minter_url.clone().ok_or_else(|| {
                ExtractError::Config("remote session provider requires minter_url".to_string())
            })?;
            Arc::new(minter::RemoteMinter::new(http, url))
        }
    };
    Ok(provider)
}
