use std::any::Any;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request},
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::error::ApiError;

/// Request logging middleware
///
/// Emits one event per request with method, path, status, client address
/// and latency, after the inner service has produced its response.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = client_ip(&request);

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        ip = %client_ip,
        duration_ms = start.elapsed().as_millis(),
        "Request processed"
    );

    response
}

/// Best-effort client address: proxy headers first, then the peer socket
pub fn client_ip(request: &Request) -> String {
    let headers = request.headers();

    headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .or_else(|| {
            headers
                .get("X-Real-IP")
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        })
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Message sent to clients when a handler panics
pub const PANIC_MESSAGE: &str = "unexpected server error";

/// Convert a handler panic into a 500 JSON response
///
/// The panic text is logged and never echoed to the client.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Request handler panicked");
    ApiError::internal(PANIC_MESSAGE).into_response()
}

/// Create CORS layer for the application
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}
