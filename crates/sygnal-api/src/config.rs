//! Configuration for the Sygnal panel service.

use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Shared secret value the original deployment shipped with. Runs are
/// expected to override it; `main` warns when it is still in effect.
const DEFAULT_SECRET: &str = "TwojSuperTajnyKlucz123";

/// Service configuration with defaults, file, and environment overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,

    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,

    /// Shared secret webhook callers must present in the `sekret` field.
    ///
    /// Environment variable: `SHARED_SECRET`
    #[serde(default = "default_shared_secret", alias = "SHARED_SECRET")]
    pub shared_secret: String,

    /// Path of the persisted state file.
    ///
    /// Environment variable: `STATE_PATH`
    #[serde(default = "default_state_path", alias = "STATE_PATH")]
    pub state_path: PathBuf,

    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Loads configuration from defaults, `config.toml`, and environment
    /// variable overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parses the server socket address from host and port.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Whether the stock shared secret is still in effect.
    pub fn uses_default_secret(&self) -> bool {
        self.shared_secret == DEFAULT_SECRET
    }

    /// Validates configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.shared_secret.is_empty() {
            anyhow::bail!("shared_secret must not be empty");
        }

        if self.state_path.as_os_str().is_empty() {
            anyhow::bail!("state_path must not be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shared_secret: default_shared_secret(),
            state_path: default_state_path(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_shared_secret() -> String {
    DEFAULT_SECRET.to_string()
}

fn default_state_path() -> PathBuf {
    PathBuf::from("stan.json")
}

fn default_log_level() -> String {
    "info,sygnal=debug".to_string()
}
