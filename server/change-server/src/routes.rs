use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{change, health},
    server::ChangeServer,
};

/// Create health check routes
pub fn health_routes() -> Router<ChangeServer> {
    Router::new().route("/health", get(health::health_check))
}

/// Create change intake routes
pub fn change_routes() -> Router<ChangeServer> {
    Router::new()
        .route("/change", post(change::submit_change))
        .layer(DefaultBodyLimit::max(change::MAX_CHANGE_BODY_BYTES))
}

/// Create all application routes
pub fn create_routes() -> Router<ChangeServer> {
    Router::new()
        .merge(health_routes())
        .merge(change_routes())
}
