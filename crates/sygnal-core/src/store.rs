//! File-backed state store.
//!
//! Owns the persisted panel document and serializes every access through a
//! single async mutex, so a reader can never observe a half-written file and
//! two concurrent writes cannot interleave their read-modify-write cycles.
//!
//! Failure policy (one policy, applied everywhere):
//! - missing file: lazily created containing `{}`, read as empty
//! - corrupt file: read as empty, overwritten by the next successful write
//! - unreadable file (I/O error): reads fall back to the in-memory copy
//! - failed persist: surfaced to the caller, in-memory copy still refreshed
//!   so reads keep working; never fatal to the process

use std::path::{Path, PathBuf};

use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

use crate::{
    error::{Result, StoreError},
    model::StateDocument,
};

/// The state store: a single JSON document on disk plus a best-effort
/// in-memory copy.
///
/// Cheap to share behind an [`std::sync::Arc`]; all methods take `&self`.
pub struct StateStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    /// Last known document; serves reads when the file is unreadable and
    /// keeps reads available while persistence is failing.
    fallback: StateDocument,
}

impl StateStore {
    /// Creates a store persisting to `path`. The file does not need to
    /// exist; it is created on first access.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), inner: Mutex::new(Inner { fallback: StateDocument::new() }) }
    }

    /// Path of the persisted state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current document.
    ///
    /// Never fails: a missing file is created empty, a corrupt file reads as
    /// empty, and an unreadable file falls back to the in-memory copy.
    pub async fn read(&self) -> StateDocument {
        let mut inner = self.inner.lock().await;
        self.load_locked(&mut inner).await
    }

    /// Sets `column = value` under `interval` and persists the full
    /// document, returning it.
    ///
    /// Last write wins for a repeated (interval, column) pair; sibling
    /// columns are merged, never replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persist`] when the state file cannot be
    /// written. The in-memory copy is refreshed first, so subsequent reads
    /// still observe the update.
    pub async fn update(&self, interval: &str, column: &str, value: &str) -> Result<StateDocument> {
        let mut inner = self.inner.lock().await;

        let mut document = self.load_locked(&mut inner).await;
        document.set(interval, column, value);
        inner.fallback = document.clone();

        self.persist(&document).await?;

        debug!(interval, column, value, "state updated and persisted");
        Ok(document)
    }

    /// Reads the document from disk. Must be called with the lock held.
    async fn load_locked(&self, inner: &mut Inner) -> StateDocument {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<StateDocument>(&bytes) {
                Ok(document) => {
                    inner.fallback = document.clone();
                    document
                },
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "state file is corrupt, treating as empty"
                    );
                    inner.fallback = StateDocument::new();
                    StateDocument::new()
                },
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "state file missing, creating empty document");
                if let Err(e) = self.persist(&StateDocument::new()).await {
                    warn!(error = %e, "could not create empty state file");
                }
                StateDocument::new()
            },
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "state file unreadable, serving in-memory copy"
                );
                inner.fallback.clone()
            },
        }
    }

    /// Writes the document to disk, pretty-printed with non-ASCII kept
    /// verbatim.
    async fn persist(&self, document: &StateDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json.as_bytes())
            .await
            .map_err(|source| StoreError::Persist { path: self.path.clone(), source })
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore").field("path", &self.path).finish_non_exhaustive()
    }
}
