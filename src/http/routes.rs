//! Axum router configuration

use axum::{
    handler::Handler,
    http::{header, Method},
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{
    download_caption, extract_info, fallback, get_video_streams, method_not_allowed, preflight,
    preview_caption, status, ui,
};
use super::middleware::request_logger;

/// POST operation that also answers GET with the status listing.
fn operation<H, T>(handler: H) -> MethodRouter<Arc<AppState>>
where
    H: Handler<T, Arc<AppState>>,
    T: 'static,
{
    post(handler)
        .get(status)
        .options(preflight)
        .fallback(method_not_allowed)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // POST on the root is not an operation, so it answers like an unknown path
        .route("/", get(status).options(preflight).fallback(fallback))
        .route("/extract-info", operation(extract_info))
        .route("/download-caption", operation(download_caption))
        .route("/preview-caption", operation(preview_caption))
        .route("/get-video-streams", operation(get_video_streams))
}

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .merge(api_routes())
        // Same operations behind a path prefix for reverse proxies
        .nest("/api", api_routes());

    if state.config.ui_enabled {
        router = router.route("/ui", get(ui));
    }

    let router = router
        .fallback(fallback)
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http());

    let router = if state.config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);
        router.layer(cors)
    } else {
        router
    };

    router.with_state(state)
}
