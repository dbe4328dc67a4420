//! Gateway settings
//!
//! Loaded from an optional `gateway.toml` next to the binary, with
//! `GATEWAY_*` environment variables taking precedence.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Address the server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Origin allowed by the CORS policy
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("gateway").required(false))
            .add_source(Environment::with_prefix("GATEWAY").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_database_url() -> String {
    "sqlite://orders.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}
