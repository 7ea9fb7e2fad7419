//! Liveness probe.

use axum::{response::IntoResponse, Json};
use tracing::instrument;

/// Handles `GET /`: a static status payload confirming the process is alive.
/// Touches no external state, so it stays cheap for frequent polling.
#[instrument(name = "liveness")]
pub async fn liveness() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
    }))
}
