//! Configuration for the content service

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `CONTENT_DATABASE_URL`
pub const ENV_PREFIX: &str = "CONTENT_";

/// Content service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SeaORM connection string (`sqlite::memory:`, `postgres://...`)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// REST listener address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Log content events through tracing; disabled means no-op publishing
    #[serde(default = "default_true")]
    pub publish_events: bool,

    /// Fallback filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            bind_addr: default_bind_addr(),
            publish_events: true,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Layer defaults, an optional YAML file and `CONTENT_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .context("failed to load content service configuration")
    }
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    8
}

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
