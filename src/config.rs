//! Process configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default: `0.0.0.0`)
//! - `PORT`: bind port (default: `8080`)
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DB_POOL_SIZE`: maximum pooled connections (default: `10`)
//! - `DB_OPERATION_TIMEOUT_MS`: per-operation storage budget (default: `5000`)
//! - `SHUTDOWN_TIMEOUT_SECS`: grace period for in-flight requests (default: `10`)
//! - `LOG_FILTER`: tracing filter used when `RUST_LOG` is unset

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;
/// Tracing filter used when neither `RUST_LOG` nor `LOG_FILTER` is set.
pub const DEFAULT_LOG_FILTER: &str = "todo_api=info,tower_http=info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `STORAGE_MODE` holds an unrecognised value.
    #[error("invalid storage mode: {0}")]
    InvalidStorageMode(String),

    /// A variable could not be parsed into its expected type.
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Rejected raw value.
        value: String,
    },

    /// `DATABASE_URL` is required for `postgres` storage.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,
}

/// Backing store selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage; data is lost on exit.
    #[default]
    InMemory,
    /// `PostgreSQL` storage.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Connection settings for `PostgreSQL` storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// Deadline for a single storage operation, checkout included.
    pub operation_timeout: Duration,
}

impl DatabaseSettings {
    /// Creates settings with the default pool size and timeout.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            operation_timeout: Duration::from_millis(DEFAULT_OPERATION_TIMEOUT_MS),
        }
    }
}

/// Full process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_address: SocketAddr,
    /// Selected storage backend.
    pub storage_mode: StorageMode,
    /// Database settings; present whenever `storage_mode` is `Postgres`.
    pub database: Option<DatabaseSettings>,
    /// Grace period for in-flight requests after a shutdown signal.
    pub shutdown_timeout: Duration,
    /// Default tracing filter directive.
    pub log_filter: String,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is malformed or `DATABASE_URL` is
    /// missing in `postgres` mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// Empty and whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is malformed or `DATABASE_URL` is
    /// missing in `postgres` mode.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let host: IpAddr = parse_or(&read, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port: u16 = parse_or(&read, "PORT", DEFAULT_PORT)?;
        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();

        let database = match (storage_mode, read("DATABASE_URL")) {
            (StorageMode::Postgres, None) => return Err(ConfigError::MissingDatabaseUrl),
            (_, None) => None,
            (_, Some(url)) => Some(DatabaseSettings {
                url,
                pool_size: parse_or(&read, "DB_POOL_SIZE", DEFAULT_POOL_SIZE)?,
                operation_timeout: Duration::from_millis(parse_or(
                    &read,
                    "DB_OPERATION_TIMEOUT_MS",
                    DEFAULT_OPERATION_TIMEOUT_MS,
                )?),
            }),
        };

        Ok(Self {
            bind_address: SocketAddr::new(host, port),
            storage_mode,
            database,
            shutdown_timeout: Duration::from_secs(parse_or(
                &read,
                "SHUTDOWN_TIMEOUT_SECS",
                DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            )?),
            log_filter: read("LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        })
    }
}

fn parse_or<T, R>(read: &R, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    R: Fn(&str) -> Option<String>,
{
    read(name).map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value })
    })
}
