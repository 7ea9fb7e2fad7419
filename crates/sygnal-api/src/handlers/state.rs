//! Read-only panel state endpoint for the widget.

use axum::{extract::State, Json};
use sygnal_core::StateDocument;
use tracing::{debug, instrument};

use crate::server::AppState;

/// Handles `GET /stan`: returns the full state document as JSON, no
/// authentication required.
#[instrument(name = "get_state", skip(state))]
pub async fn get_state(State(state): State<AppState>) -> Json<StateDocument> {
    let document = state.store.read().await;
    debug!(intervals = document.interval_count(), "serving panel state");
    Json(document)
}
