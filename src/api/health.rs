//! Health Check Route

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

/// GET /api - liveness check used by the front-end
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "API is running 🚀",
    })
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api", get(health))
}
