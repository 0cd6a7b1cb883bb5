//! Remote token minting
//!
//! The BotGuard challenge has to run inside a JavaScript VM, so minting is
//! delegated to an external service. This side only ships the content
//! binding out and validates the token blob that comes back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::encoding::{base64_to_bytes, bytes_to_base64};
use super::visitor::generate_visitor_data;
use super::{CredentialsProvider, SessionCredentials};
use crate::error::{ExtractError, Result};

#[derive(Debug, Serialize)]
struct MintRequest<'a> {
    content_binding: &'a str,
}

#[derive(Debug, Deserialize)]
struct MintResponse {
    #[serde(alias = "poToken", alias = "po_token")]
    token: Option<String>,
}

pub struct RemoteMinter {
    http: reqwest::Client,
    minter_url: String,
}

impl RemoteMinter {
    pub fn new(http: reqwest::Client, minter_url: impl Into<String>) -> Self {
        Self {
            http,
            minter_url: minter_url.into(),
        }
    }

    async fn mint(&self, content_binding: &str) -> Result<String> {
        tracing::debug!("Requesting token from {}", self.minter_url);

        let response = self
            .http
            .post(&self.minter_url)
            .json(&MintRequest { content_binding })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::UpstreamStatus {
                status: status.as_u16(),
                url: self.minter_url.clone(),
            });
        }

        let body: MintResponse = response.json().await?;
        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ExtractError::Session("minter returned no token".to_string()))?;

        normalize_token(&token)
    }
}

/// Tokens are opaque, but they must at least be valid base64.
fn normalize_token(token: &str) -> Result<String> {
    let bytes = base64_to_bytes(token)?;
    if bytes.is_empty() {
        return Err(ExtractError::Session("minter returned an empty token".to_string()));
    }
    Ok(bytes_to_base64(&bytes, true))
}

#[async_trait]
impl CredentialsProvider for RemoteMinter {
    async fn acquire_session_credentials(&self) -> Result<SessionCredentials> {
        let session_id = generate_visitor_data();
        let token = self.mint(&session_id).await?;
        Ok(SessionCredentials {
            session_id: Some(session_id),
            token: Some(token),
        })
    }
}
