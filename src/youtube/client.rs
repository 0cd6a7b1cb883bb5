//! InnerTube HTTP client

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::UpstreamConfig;
use crate::error::{ExtractError, Result};
use crate::session::{CredentialsProvider, SessionCredentials};
use crate::video_id::VideoId;
use crate::youtube::innertube::PlayerResponse;
use crate::youtube::player::{self, Player};
use crate::youtube::transcript;
use crate::youtube::types::{CaptionSegment, CaptionTrack, VideoInfo};
use crate::youtube::VideoSource;

/// Upstream session, built once and shared by every request
#[derive(Debug)]
pub struct Session {
    pub credentials: SessionCredentials,
    pub player: Player,
}

/// YouTube client.
#[derive(Clone)]
pub struct YouTubeClient {
    inner: Arc<YouTubeClientInner>,
}

struct YouTubeClientInner {
    config: UpstreamConfig,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialsProvider>,
    session: OnceCell<Arc<Session>>,
}

/// Build the shared upstream HTTP client.
pub fn build_http_client(config: &UpstreamConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

impl YouTubeClient {
    pub fn new(
        config: UpstreamConfig,
        http: reqwest::Client,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(YouTubeClientInner {
                config,
                http,
                credentials,
                session: OnceCell::new(),
            }),
        }
    }

    /// Build a URL for an upstream path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.config.base(), path)
    }

    /// Get the session, creating it on first use.
    ///
    /// Concurrent first callers wait on the same initialization. A failed
    /// initialization leaves the cell empty so a later request retries.
    pub async fn session(&self) -> Result<Arc<Session>> {
        self.inner
            .session
            .get_or_try_init(|| self.create_session())
            .await
            .cloned()
    }

    async fn create_session(&self) -> Result<Arc<Session>> {
        let credentials = self.inner.credentials.acquire_session_credentials().await?;

        let iframe_api = self.get_text(&self.build_url("/iframe_api")).await?;
        let player_id = player::player_id(&iframe_api)?;
        let script = self
            .get_text(&self.build_url(&player::player_script_path(&player_id)))
            .await?;
        let player = Player::from_script(&player_id, &script);

        tracing::info!(
            "Upstream session ready: player={}, sts={:?}, visitor={}, token={}",
            player.id,
            player.signature_timestamp,
            credentials.session_id.is_some(),
            credentials.token.is_some()
        );

        Ok(Arc::new(Session {
            credentials,
            player,
        }))
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.inner.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    fn player_request_body(&self, session: &Session, video_id: &VideoId) -> serde_json::Value {
        let config = &self.inner.config;
        let mut body = json!({
            "context": {
                "client": {
                    "clientName": config.client_name,
                    "clientVersion": config.client_version,
                    "hl": config.hl,
                }
            },
            "videoId": video_id.as_str(),
            "contentCheckOk": true,
            "racyCheckOk": true,
        });

        if let Some(visitor) = &session.credentials.session_id {
            body["context"]["client"]["visitorData"] = json!(visitor);
        }
        if let Some(sts) = session.player.signature_timestamp {
            body["playbackContext"] = json!({
                "contentPlaybackContext": { "signatureTimestamp": sts }
            });
        }
        if let Some(token) = &session.credentials.token {
            body["serviceIntegrityDimensions"] = json!({ "poToken": token });
        }
        body
    }
}

#[async_trait]
impl VideoSource for YouTubeClient {
    async fn video_info(&self, video_id: &VideoId) -> Result<VideoInfo> {
        let session = self.session().await?;
        let url = self.build_url("/youtubei/v1/player?prettyPrint=false");
        let config = &self.inner.config;

        tracing::debug!("Player request for {}", video_id);

        let mut request = self
            .inner
            .http
            .post(&url)
            .header("X-Youtube-Client-Version", config.client_version.as_str())
            .header("Origin", config.base())
            .json(&self.player_request_body(&session, video_id));
        if let Some(id) = config.client_name_id() {
            request = request.header("X-Youtube-Client-Name", id.to_string());
        }
        if let Some(visitor) = &session.credentials.session_id {
            request = request.header("X-Goog-Visitor-Id", visitor.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        let player_response: PlayerResponse = response.json().await?;
        player_response.into_video_info(video_id.as_str())
    }

    async fn transcript(&self, track: &CaptionTrack) -> Result<Vec<CaptionSegment>> {
        let session = self.session().await?;
        let url = transcript::timedtext_url(
            &track.base_url,
            session.credentials.token.as_deref(),
            &self.inner.config.client_name,
        )?;

        tracing::debug!("Transcript request for {}", track.language_code);

        let body = self.get_text(&url).await?;
        transcript::parse_json3(&body)
    }

    async fn decipher(&self, signature_cipher: &str) -> Result<String> {
        let session = self.session().await?;
        session.player.decipher(signature_cipher)
    }
}
