//! Change Server - validates and acknowledges Change requests
//!
//! A `Change` describes a desired code modification (prompt, target
//! repositories, agent, branch). The server checks it against an ordered
//! rule chain and either echoes the normalized request or returns the first
//! violated rule as a `400` error. Nothing is dispatched or stored.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use server::ChangeServer;
pub use validation::{ChangeRejection, ChangeValidator};

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(server: ChangeServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn(middleware::request_logging_middleware))
                .layer(CatchPanicLayer::custom(middleware::panic_response)),
        )
        .with_state(server)
}
