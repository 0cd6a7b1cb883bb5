//! End-to-end tests through the router

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::config::ServerConfig;
use crate::http::create_router;
use crate::integration::fixtures::{demo_segments, FakeSource, VIDEO_ID};
use crate::state::AppState;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn app_with(source: FakeSource) -> Router {
    let state = Arc::new(AppState::new(ServerConfig::default(), Arc::new(source)));
    create_router(state)
}

fn app() -> Router {
    app_with(FakeSource::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, _, body) = post(app, uri, body).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn empty(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_status_listing() {
    let (status, _, body) = send(app(), empty(Method::GET, "/")).await;
    assert_eq!(status, StatusCode::OK);

    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(value["endpoints"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_extract_info() {
    let (status, value) = post_json(app(), "/extract-info", json!({ "url": WATCH_URL })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["title"], "Demo Video");
    assert_eq!(value["video_id"], VIDEO_ID);
    assert_eq!(
        value["thumbnail"],
        "https://i.ytimg.test/vi/dQw4w9WgXcQ/hq720.jpg"
    );
    assert_eq!(
        value["available_captions"],
        json!([
            { "languageCode": "en", "name": "English", "kind": "" },
            { "languageCode": "ko", "name": "Korean (auto-generated)", "kind": "asr" },
        ])
    );
}

#[tokio::test]
async fn test_extract_info_fallbacks() {
    let mut source = FakeSource::default();
    source.info.title = None;
    source.info.thumbnails.clear();
    source.info.captions.clear();

    let (status, value) = post_json(
        app_with(source),
        "/extract-info",
        json!({ "url": "https://youtu.be/dQw4w9WgXcQ" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["title"], "Unknown");
    assert_eq!(
        value["thumbnail"],
        "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
    );
    assert_eq!(value["available_captions"], json!([]));
}

#[tokio::test]
async fn test_missing_url() {
    let (status, value) = post_json(app(), "/extract-info", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["detail"], "URL is required");

    let (status, value) = post_json(app(), "/get-video-streams", json!({ "url": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["detail"], "URL is required");
}

#[tokio::test]
async fn test_empty_body_counts_as_empty_object() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/extract-info")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("URL is required"));
}

#[tokio::test]
async fn test_malformed_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/extract-info")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert!(value["detail"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_invalid_url() {
    let (status, value) =
        post_json(app(), "/extract-info", json!({ "url": "not a video" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["detail"].as_str().unwrap().contains("not a video"));
}

#[tokio::test]
async fn test_missing_language_code() {
    for uri in ["/download-caption", "/preview-caption"] {
        let (status, value) = post_json(app(), uri, json!({ "url": WATCH_URL })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(value["detail"], "language_code is required");
    }
}

#[tokio::test]
async fn test_caption_not_found() {
    for uri in ["/download-caption", "/preview-caption"] {
        let (status, value) = post_json(
            app(),
            uri,
            json!({ "url": WATCH_URL, "language_code": "fr" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(value["detail"], "Caption not found: fr");
    }
}

#[tokio::test]
async fn test_download_srt_by_default() {
    let mut source = FakeSource::default();
    source.segments = demo_segments(2);

    let (status, headers, body) = post(
        app_with(source),
        "/download-caption",
        json!({ "url": WATCH_URL, "language_code": "en" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/x-subrip; charset=utf-8"
    );
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"subtitle.srt\""
    );
    assert_eq!(
        body,
        "1\n00:00:00,000 --> 00:00:02,000\nLine 1\n\n\
         2\n00:00:02,500 --> 00:00:04,500\nLine 2\n\n"
    );
}

#[tokio::test]
async fn test_download_vtt_and_txt() {
    let mut source = FakeSource::default();
    source.segments = demo_segments(1);

    let (status, headers, body) = post(
        app_with(source.clone()),
        "/download-caption",
        json!({ "url": WATCH_URL, "language_code": "ko", "format": "VTT" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/vtt; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"subtitle.vtt\""
    );
    assert_eq!(body, "WEBVTT\n\n00:00:00.000 --> 00:00:02.000\nLine 1\n\n");

    let (status, headers, body) = post(
        app_with(source),
        "/download-caption",
        json!({ "url": WATCH_URL, "language_code": "en", "format": "txt" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(body, "Line 1\n");
}

#[tokio::test]
async fn test_download_unsupported_format() {
    let (status, value) = post_json(
        app(),
        "/download-caption",
        json!({ "url": WATCH_URL, "language_code": "en", "format": "ass" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["detail"].as_str().unwrap().contains("ass"));
}

#[tokio::test]
async fn test_preview_caption() {
    let (status, value) = post_json(
        app(),
        "/preview-caption",
        json!({ "url": WATCH_URL, "language_code": "en" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["video_title"], "Demo Video");
    assert_eq!(value["language"], "English");

    let preview = value["preview"].as_array().unwrap();
    assert_eq!(preview.len(), 10);
    assert_eq!(preview[0], json!({ "time": "00:00:00,000", "text": "Line 1" }));
    assert_eq!(preview[9], json!({ "time": "00:00:22,500", "text": "Line 10" }));
}

#[tokio::test]
async fn test_get_video_streams() {
    let (status, value) =
        post_json(app(), "/get-video-streams", json!({ "url": WATCH_URL })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["title"], "Demo Video");
    assert_eq!(value["video_id"], VIDEO_ID);

    // itag 22 has an undecipherable cipher and itag 137 is video-only
    let streams = value["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 2);
    assert_eq!(
        streams[0],
        json!({
            "type": "video",
            "quality": "360p",
            "url": "https://rr.test/videoplayback?itag=18",
            "mimeType": "video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"",
            "size": "3.0 MB",
        })
    );
    assert_eq!(streams[1]["type"], "audio");
    assert_eq!(streams[1]["quality"], "AUDIO_QUALITY_MEDIUM");
    assert_eq!(streams[1]["size"], Value::Null);
    assert!(streams[1]["url"]
        .as_str()
        .unwrap()
        .starts_with("https://rr.test/videoplayback?itag=deciphered"));
}

#[tokio::test]
async fn test_upstream_failure_is_500() {
    let (status, value) = post_json(
        app_with(FakeSource::failing(403)),
        "/extract-info",
        json!({ "url": WATCH_URL }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(value["detail"].as_str().unwrap().contains("403"));
}

#[tokio::test]
async fn test_unknown_path() {
    let (status, value) = post_json(app(), "/nope", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["detail"], "Not found: /nope");

    // GET anywhere answers with the status listing
    let (status, _, body) = send(app(), empty(Method::GET, "/nope")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_post_to_root_is_not_found() {
    for uri in ["/", "/api"] {
        let (status, value) = post_json(app(), uri, json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(value["detail"], format!("Not found: {}", uri));
    }
}

#[tokio::test]
async fn test_method_not_allowed() {
    for uri in ["/", "/extract-info", "/nope", "/api/preview-caption"] {
        let (status, _, body) = send(app(), empty(Method::DELETE, uri)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", uri);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["detail"], "Method not allowed");
    }

    let (status, _, _) = send(app(), empty(Method::PUT, "/download-caption")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_get_on_operation_returns_status() {
    let (status, _, body) = send(app(), empty(Method::GET, "/extract-info")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("YouTube Caption & Video Downloader API"));
}

#[tokio::test]
async fn test_plain_options_is_200() {
    for uri in ["/", "/preview-caption", "/nope", "/api/extract-info"] {
        let (status, _, body) = send(app(), empty(Method::OPTIONS, uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn test_api_prefix() {
    let (status, value) =
        post_json(app(), "/api/extract-info", json!({ "url": WATCH_URL })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["video_id"], VIDEO_ID);

    let (status, _, body) = send(app(), empty(Method::GET, "/api")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}
