//! Request rejection taxonomy and wire-format responses.
//!
//! Every rejection is local to the request: malformed input and missing
//! fields are 400, a bad secret is 403 (distinct from malformed input), and
//! a failed persist is 500. None of them are fatal to the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sygnal_core::StoreError;
use thiserror::Error;

/// Status message in the panel's wire format, shared by success and error
/// responses. The field names are the external contract of the original
/// deployment (TradingView alerts and the Android widget consume them).
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    /// `"sukces"` or `"błąd"`.
    pub status: &'static str,
    /// Human-readable message.
    #[serde(rename = "wiadomość")]
    pub wiadomosc: String,
}

impl StatusMessage {
    /// Success acknowledgment.
    pub fn sukces(wiadomosc: String) -> Self {
        Self { status: "sukces", wiadomosc }
    }

    /// Error message.
    pub fn blad(wiadomosc: String) -> Self {
        Self { status: "błąd", wiadomosc }
    }
}

/// Rejections produced while handling a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body was empty.
    #[error("request body was empty")]
    EmptyBody,

    /// Request body was not valid JSON.
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Shared secret absent or mismatched.
    #[error("missing or invalid shared secret")]
    Unauthorized,

    /// A required field was absent or empty.
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),

    /// Persisting the updated document failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyBody | Self::MalformedJson(_) | Self::MissingField(_) => {
                StatusCode::BAD_REQUEST
            },
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message in the panel's wire language.
    fn client_message(&self) -> String {
        match self {
            Self::EmptyBody => "Puste żądanie".to_string(),
            Self::MalformedJson(_) => "Niepoprawny JSON".to_string(),
            Self::Unauthorized => "Odmowa dostępu".to_string(),
            Self::MissingField(field) => format!("Brakujące dane: {field}"),
            Self::Store(_) => "Błąd zapisu stanu".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = StatusMessage::blad(self.client_message());
        (status, Json(body)).into_response()
    }
}
