//! HTTP request handlers.
//!
//! - `webhook` - alert ingestion (`POST /webhook`)
//! - `state` - read-only panel state (`GET /stan`)
//! - `health` - liveness probe (`GET /`)

pub mod health;
pub mod state;
pub mod webhook;

pub use health::liveness;
pub use state::get_state;
pub use webhook::handle_webhook;
