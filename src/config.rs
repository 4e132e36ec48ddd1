//! Console configuration
//!
//! Layered sources, lowest priority first: built-in defaults, an optional
//! `newsdeck.toml` in the working directory, then `NEWSDECK_*` environment
//! variables. CLI flags on the dash binary override the loaded result.

use crate::error::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Configuration for the console and its dashboard binary.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    /// Backend base URL
    pub api_url: String,
    /// Dashboard refresh interval in milliseconds
    pub refresh_ms: u64,
    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,
    /// Log file path for the dashboard binary (the terminal itself
    /// belongs to the TUI)
    pub log_file: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            refresh_ms: 1000,
            http_timeout_secs: 10,
            log_file: "/tmp/newsdeck-dash.log".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Load from the default locations.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an explicit config file (for `--config` and tests).
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let defaults = ConsoleConfig::default();
        let mut builder = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("refresh_ms", defaults.refresh_ms as i64)?
            .set_default("http_timeout_secs", defaults.http_timeout_secs as i64)?
            .set_default("log_file", defaults.log_file)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path.to_path_buf())),
            None => builder.add_source(File::with_name("newsdeck").required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix("NEWSDECK"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
