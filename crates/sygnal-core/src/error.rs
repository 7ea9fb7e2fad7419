//! Error types for state persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the state store.
///
/// Only persistence can fail; a missing or corrupt state file is treated as
/// an empty document, never as an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing the state file failed.
    #[error("failed to persist state to {}: {source}", path.display())]
    Persist {
        /// Path of the state file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing the document to JSON failed.
    #[error("failed to encode state document: {0}")]
    Encode(#[from] serde_json::Error),
}
