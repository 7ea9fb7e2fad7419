//! Test infrastructure for the Sygnal panel service.
//!
//! Provides an isolated environment per test (a temp-dir state file plus a
//! freshly built router), request helpers driven through
//! `tower::ServiceExt::oneshot`, and a fixture builder for alert payloads.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use sygnal_api::{create_router, AppState, SharedSecretAuthenticator};
use sygnal_core::{StateDocument, StateStore};
use tempfile::TempDir;
use tower::ServiceExt;

/// Shared secret every [`TestEnv`] router is configured with.
pub const TEST_SECRET: &str = "test-sekret";

/// Isolated test environment: a temp-dir state store and a router factory.
pub struct TestEnv {
    dir: TempDir,
    store: Arc<StateStore>,
}

impl TestEnv {
    /// Creates a fresh environment with an empty state store.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to create temp dir")?;
        let store = Arc::new(StateStore::open(dir.path().join("stan.json")));
        Ok(Self { dir, store })
    }

    /// The state store backing this environment.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// Path of the persisted state file.
    pub fn state_path(&self) -> &Path {
        self.store.path()
    }

    /// Root of the temp directory backing this environment.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Builds a router over this environment's store, authenticating with
    /// [`TEST_SECRET`].
    pub fn router(&self) -> Router {
        let auth = Arc::new(SharedSecretAuthenticator::new(TEST_SECRET));
        create_router(AppState::new(Arc::clone(&self.store), auth))
    }

    /// Sends `POST /webhook` with a JSON payload.
    pub async fn post_webhook(&self, payload: &serde_json::Value) -> Result<Response> {
        self.post_webhook_raw(payload.to_string()).await
    }

    /// Sends `POST /webhook` with a raw body, for malformed-input tests.
    pub async fn post_webhook_raw(&self, body: impl Into<String>) -> Result<Response> {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .context("failed to build request")?;

        self.router().oneshot(request).await.context("request failed")
    }

    /// Sends a `GET` request to the given path.
    pub async fn get(&self, path: &str) -> Result<Response> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .context("failed to build request")?;

        self.router().oneshot(request).await.context("request failed")
    }

    /// Reads the document straight from the store, bypassing HTTP.
    pub async fn read_document(&self) -> StateDocument {
        self.store.read().await
    }
}

/// Reads a response body and parses it as JSON.
pub async fn body_json(response: Response) -> Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .context("failed to read response body")?;
    serde_json::from_slice(&bytes).context("response body is not valid JSON")
}

/// Builder for alert payloads, defaulting to a fully valid alert signed with
/// [`TEST_SECRET`].
#[derive(Debug, Clone)]
pub struct AlertBuilder {
    sekret: Option<String>,
    interwal: Option<String>,
    kolumna: Option<String>,
    wartosc: Option<String>,
}

impl Default for AlertBuilder {
    fn default() -> Self {
        Self {
            sekret: Some(TEST_SECRET.to_string()),
            interwal: Some("1h".to_string()),
            kolumna: Some("EMA".to_string()),
            wartosc: Some("KUPUJ".to_string()),
        }
    }
}

impl AlertBuilder {
    /// Starts from a valid alert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the secret.
    pub fn sekret(mut self, value: impl Into<String>) -> Self {
        self.sekret = Some(value.into());
        self
    }

    /// Drops the secret entirely.
    pub fn without_sekret(mut self) -> Self {
        self.sekret = None;
        self
    }

    /// Overrides the interval.
    pub fn interwal(mut self, value: impl Into<String>) -> Self {
        self.interwal = Some(value.into());
        self
    }

    /// Drops the interval field.
    pub fn without_interwal(mut self) -> Self {
        self.interwal = None;
        self
    }

    /// Overrides the column.
    pub fn kolumna(mut self, value: impl Into<String>) -> Self {
        self.kolumna = Some(value.into());
        self
    }

    /// Drops the column field.
    pub fn without_kolumna(mut self) -> Self {
        self.kolumna = None;
        self
    }

    /// Overrides the value.
    pub fn wartosc(mut self, value: impl Into<String>) -> Self {
        self.wartosc = Some(value.into());
        self
    }

    /// Drops the value field.
    pub fn without_wartosc(mut self) -> Self {
        self.wartosc = None;
        self
    }

    /// Builds the JSON payload, emitting only the fields that are set.
    pub fn build(self) -> serde_json::Value {
        let mut payload = serde_json::Map::new();
        if let Some(sekret) = self.sekret {
            payload.insert("sekret".to_string(), sekret.into());
        }
        if let Some(interwal) = self.interwal {
            payload.insert("interwal".to_string(), interwal.into());
        }
        if let Some(kolumna) = self.kolumna {
            payload.insert("kolumna".to_string(), kolumna.into());
        }
        if let Some(wartosc) = self.wartosc {
            payload.insert("wartosc".to_string(), wartosc.into());
        }
        serde_json::Value::Object(payload)
    }
}
