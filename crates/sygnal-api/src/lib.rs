//! Sygnal HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::{Authenticator, SharedSecretAuthenticator};
pub use config::Config;
pub use error::ApiError;
pub use server::{create_router, start_server, AppState};
