//! Runtime settings for the server, filled from the environment by [`crate::config::loader`].

use std::net::SocketAddr;

/// Which [`crate::store::StudentStore`] implementation backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// `students` table in PostgreSQL.
    Postgres,
    /// Process-local map; contents are lost on restart.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(crate::error::ConfigError::UnknownStore(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    /// Schema holding the `students` table. Validated as a plain PostgreSQL identifier.
    pub schema: String,
    pub store: StoreBackend,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            schema: DEFAULT_SCHEMA.into(),
            store: StoreBackend::Postgres,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_connections: 5,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/students";
pub const DEFAULT_SCHEMA: &str = "public";
