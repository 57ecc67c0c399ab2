//! Server configuration loaded from the environment

use anyhow::{Context, Result};
use ::config::{Config, Environment};
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_DATABASE_PATH: &str = "cafes.db";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// `BIND_ADDRESS`
    pub bind_address: String,
    /// `DATABASE_PATH`
    pub database_path: String,
    /// `API_KEY`, the shared secret required to report a closure
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        info!("Loading configuration from environment...");
        Self::from_env(Environment::default())
    }

    fn from_env(env: Environment) -> Result<Self> {
        let mut config: ServerConfig = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        // An empty key would let an empty api_key parameter through
        if config.api_key.as_deref().is_some_and(|k| k.is_empty()) {
            config.api_key = None;
        }

        Ok(config)
    }
}
