//! Server configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `quotes.{toml,json,yaml}` in the working directory, then `QUOTES_*`
//! environment variables (e.g. `QUOTES_BIND_ADDRESS=0.0.0.0:8080`).

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use quotes_core::{QuotesError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: String,
    pub max_connections: u32,
}

impl ServerConfig {
    /// Load from the working directory and the environment
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("quotes").required(false))
                .add_source(Environment::with_prefix("QUOTES")),
        )
    }

    /// Apply defaults underneath whatever sources `builder` already has
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .set_default("bind_address", "127.0.0.1:5000")
            .and_then(|b| b.set_default("database_path", "quotes.db"))
            .and_then(|b| b.set_default("max_connections", 5))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .map_err(|e| QuotesError::Config(e.to_string()))
    }
}
