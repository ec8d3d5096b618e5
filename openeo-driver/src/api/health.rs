//! Health Check API Handler
//!
//! Simple liveness endpoint for monitoring.

use axum::{Json, http::StatusCode, response::IntoResponse};

/// GET /health
/// Liveness check
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}
