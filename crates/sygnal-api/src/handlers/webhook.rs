//! Webhook ingestion handler.
//!
//! Accepts trading-alert callbacks, validates the shared secret and the
//! three required fields, and writes the value into the state store.
//! Validation is staged: malformed input first, then authorization, then
//! field presence. A rejected request never mutates the document.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::{
    error::{ApiError, StatusMessage},
    server::AppState,
};

/// Incoming alert payload. Field names are the webhook wire contract.
#[derive(Debug, Deserialize)]
pub struct AlertPayload {
    /// Shared secret presented by the caller.
    #[serde(default)]
    pub sekret: Option<String>,
    /// Time-bucket identifier, e.g. `"1h"`.
    #[serde(default)]
    pub interwal: Option<String>,
    /// Signal column name, e.g. `"EMA_Krotka"`.
    #[serde(default)]
    pub kolumna: Option<String>,
    /// Latest value for the column, e.g. `"KUPUJ"`.
    #[serde(default)]
    pub wartosc: Option<String>,
}

/// Handles `POST /webhook`.
///
/// Returns 400 for an empty or unparsable body, 403 for a bad secret,
/// 400 naming the field for missing/empty required fields, 500 when the
/// persist fails, and otherwise 200 with an acknowledgment naming the
/// updated interval.
#[instrument(name = "handle_webhook", skip(state, body), fields(body_len = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    if body.is_empty() {
        warn!("webhook request body was empty");
        return Err(ApiError::EmptyBody);
    }

    let alert: AlertPayload = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "webhook body is not valid JSON");
        ApiError::MalformedJson(e)
    })?;

    // The secret is checked before field validation.
    let authorized = alert.sekret.as_deref().is_some_and(|s| state.auth.verify(s));
    if !authorized {
        warn!("webhook rejected: bad or missing shared secret");
        return Err(ApiError::Unauthorized);
    }

    let interwal = require_field("interwal", alert.interwal)?;
    let kolumna = require_field("kolumna", alert.kolumna)?;
    let wartosc = require_field("wartosc", alert.wartosc)?;

    state.store.update(&interwal, &kolumna, &wartosc).await.map_err(|e| {
        error!(error = %e, "failed to persist panel state");
        ApiError::Store(e)
    })?;

    info!(interwal = %interwal, kolumna = %kolumna, wartosc = %wartosc, "panel state updated");

    Ok((StatusCode::OK, Json(StatusMessage::sukces(format!("Zaktualizowano {interwal}")))))
}

fn require_field(name: &'static str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => {
            warn!(field = name, "webhook rejected: required field missing or empty");
            Err(ApiError::MissingField(name))
        },
    }
}
