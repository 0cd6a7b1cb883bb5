//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the caption and stream endpoints
//! - Lenient JSON body extraction
//! - `{"detail": ...}` error responses
//! - Request logging and CORS middleware

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
