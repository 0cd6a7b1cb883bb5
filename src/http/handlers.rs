//! HTTP request handlers
//!
//! Implements handlers for all caption and stream endpoints.

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::caption::{self, CaptionFormat, CaptionPreview};
use crate::error::ExtractError;
use crate::state::AppState;
use crate::streams::{list_streams, StreamEntry};
use crate::video_id::VideoId;

use super::extract::{CaptionRequest, JsonBody};

/// HTTP error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("API error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidUrl(_) | ExtractError::UnsupportedFormat(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ExtractError::CaptionNotFound(_) => ApiError::NotFound(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

/// Video info response
#[derive(Debug, Serialize)]
pub struct VideoInfoResponse {
    pub title: String,
    pub thumbnail: String,
    pub video_id: String,
    pub available_captions: Vec<CaptionTrackInfo>,
}

#[derive(Debug, Serialize)]
pub struct CaptionTrackInfo {
    #[serde(rename = "languageCode")]
    pub language_code: String,
    pub name: String,
    /// "asr" for auto-generated tracks, empty otherwise
    pub kind: String,
}

/// Stream listing response
#[derive(Debug, Serialize)]
pub struct VideoStreamsResponse {
    pub title: String,
    pub thumbnail: String,
    pub video_id: String,
    pub streams: Vec<StreamEntry>,
}

/// Status and capability listing
/// GET /
pub async fn status() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "YouTube Caption & Video Downloader API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /extract-info",
            "POST /download-caption",
            "POST /preview-caption",
            "POST /get-video-streams",
        ]
    }))
}

/// CORS preflight without preflight headers
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for paths no route matches
pub async fn fallback(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else if method == Method::GET {
        status().await.into_response()
    } else if method != Method::POST {
        ApiError::MethodNotAllowed.into_response()
    } else {
        ApiError::NotFound(format!("Not found: {}", uri.path())).into_response()
    }
}

/// Browser UI
/// GET /ui
pub async fn ui() -> Html<&'static str> {
    Html(include_str!("../../ui/index.html"))
}

/// Video metadata and caption tracks
/// POST /extract-info
pub async fn extract_info(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CaptionRequest>,
) -> Result<Json<VideoInfoResponse>, ApiError> {
    let video_id = VideoId::parse(req.url()?)?;
    let info = state.source.video_info(&video_id).await?;

    let available_captions = info
        .captions
        .iter()
        .map(|track| CaptionTrackInfo {
            language_code: track.language_code.clone(),
            name: track.label(),
            kind: if track.is_auto_generated() {
                "asr".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    Ok(Json(VideoInfoResponse {
        title: info.title_or_unknown(),
        thumbnail: info.thumbnail_or_fallback(&video_id, &state.config.upstream.thumbnail_base),
        video_id: video_id.to_string(),
        available_captions,
    }))
}

/// Formatted caption file
/// POST /download-caption
pub async fn download_caption(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CaptionRequest>,
) -> Result<Response, ApiError> {
    let url = req.url()?;
    let language_code = req.language_code()?;
    let format = match req.format.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(f) => f.parse::<CaptionFormat>()?,
        None => CaptionFormat::default(),
    };
    let video_id = VideoId::parse(url)?;

    let resolved = caption::fetch_caption(state.source.as_ref(), &video_id, language_code).await?;
    let content = caption::render(&resolved.segments, format);

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        format.filename()
    ))
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(format.content_type())),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response())
}

/// First caption lines
/// POST /preview-caption
pub async fn preview_caption(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CaptionRequest>,
) -> Result<Json<CaptionPreview>, ApiError> {
    let url = req.url()?;
    let language_code = req.language_code()?;
    let video_id = VideoId::parse(url)?;

    let resolved = caption::fetch_caption(state.source.as_ref(), &video_id, language_code).await?;
    Ok(Json(caption::preview(&resolved)))
}

/// Downloadable stream URLs
/// POST /get-video-streams
pub async fn get_video_streams(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CaptionRequest>,
) -> Result<Json<VideoStreamsResponse>, ApiError> {
    let video_id = VideoId::parse(req.url()?)?;
    let info = state.source.video_info(&video_id).await?;

    let streams = list_streams(state.source.as_ref(), &info.streaming).await;

    Ok(Json(VideoStreamsResponse {
        title: info.title_or_unknown(),
        thumbnail: info.thumbnail_or_fallback(&video_id, &state.config.upstream.thumbnail_base),
        video_id: video_id.to_string(),
        streams,
    }))
}
