//! Sygnal panel service.
//!
//! Main entry point: loads configuration, initializes tracing, builds the
//! state store and authenticator, and runs the HTTP server until a shutdown
//! signal arrives.

use std::sync::Arc;

use anyhow::{Context, Result};
use sygnal_api::{AppState, Config, SharedSecretAuthenticator};
use sygnal_core::StateStore;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config.rust_log);

    info!(
        host = %config.host,
        port = config.port,
        state_path = %config.state_path.display(),
        "Configuration loaded"
    );

    if config.uses_default_secret() {
        warn!(
            "Running with the default shared secret, set SHARED_SECRET before exposing this service"
        );
    }

    let store = Arc::new(StateStore::open(&config.state_path));
    let auth = Arc::new(SharedSecretAuthenticator::new(&config.shared_secret));
    let state = AppState::new(store, auth);

    let addr = config.parse_server_addr()?;
    info!(addr = %addr, "Sygnal is ready to receive webhooks");

    sygnal_api::start_server(state, addr).await.context("server terminated with an error")?;

    info!("Sygnal shutdown complete");
    Ok(())
}

/// Initializes tracing, preferring `RUST_LOG` from the environment and
/// falling back to the configured filter.
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_target(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
