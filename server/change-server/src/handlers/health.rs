use axum::response::Json;
use serde::{Deserialize, Serialize};

/// Name reported by the health probe
pub const SERVICE_NAME: &str = "demo-app";

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Health check handler
pub async fn health_check() -> Json<HealthResponse> {
    tracing::info!("Health check requested");

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
