//! Load [`ServerConfig`] from environment variables (optionally seeded from a `.env` file).

use crate::config::types::{ServerConfig, StoreBackend};
use crate::error::ConfigError;
use std::str::FromStr;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_SCHEMA: &str = "STUDENT_SCHEMA";
pub const ENV_STORE: &str = "STUDENT_STORE";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const ENV_BODY_LIMIT: &str = "BODY_LIMIT_BYTES";

impl ServerConfig {
    /// Read `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = ServerConfig::default();

        if let Some(url) = get(ENV_DATABASE_URL) {
            config.database_url = url;
        }
        if let Some(schema) = get(ENV_SCHEMA) {
            if !is_valid_identifier(&schema) {
                return Err(ConfigError::Invalid {
                    key: ENV_SCHEMA,
                    value: schema,
                });
            }
            config.schema = schema;
        }
        if let Some(store) = get(ENV_STORE) {
            config.store = StoreBackend::from_str(&store)?;
        }
        if let Some(addr) = get(ENV_BIND_ADDR) {
            config.bind_addr = parse(ENV_BIND_ADDR, addr)?;
        }
        if let Some(n) = get(ENV_MAX_CONNECTIONS) {
            config.max_connections = parse(ENV_MAX_CONNECTIONS, n)?;
        }
        if let Some(n) = get(ENV_BODY_LIMIT) {
            config.body_limit_bytes = parse(ENV_BODY_LIMIT, n)?;
        }
        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { key, value })
}

/// Lowercase-safe PostgreSQL identifier: letter or underscore, then letters, digits, underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
