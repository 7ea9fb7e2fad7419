//! Core domain model and persistence for the Sygnal panel.
//!
//! Provides the two-level panel state document (interval -> column -> value)
//! and the file-backed store that owns it. The HTTP layer depends on these
//! types; nothing here knows about the wire format beyond JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod store;

pub use error::{Result, StoreError};
pub use model::{IntervalRecord, StateDocument};
pub use store::StateStore;
