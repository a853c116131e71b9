//! Database configuration - loaded from environment variables
//!
//! Required:
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_NAME`, `DB_PASSWORD`
//!
//! Optional:
//! - `DB_SSLMODE`: libpq-style SSL mode (default: disable)
//!
//! There are no defaults for the required keys. A deployment without them
//! must not start against whatever database happens to be reachable.

use std::fmt;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USER: &str = "DB_USER";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_SSLMODE: &str = "DB_SSLMODE";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {key} is not set")]
    Missing { key: &'static str },

    #[error("invalid {key} '{value}': expected a port number (1-65535)")]
    InvalidPort { key: &'static str, value: String },

    #[error("invalid {key} '{value}': {source}")]
    InvalidSslMode {
        key: &'static str,
        value: String,
        #[source]
        source: sqlx::Error,
    },
}

/// PostgreSQL connection parameters
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub dbname: String,
    pub password: String,
    pub ssl_mode: PgSslMode,
}

impl DbConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (for testing).
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing { key })
        };

        let host = required(DB_HOST)?;
        let raw_port = required(DB_PORT)?;
        let user = required(DB_USER)?;
        let dbname = required(DB_NAME)?;
        let password = required(DB_PASSWORD)?;

        let port = match raw_port.trim().parse::<u16>() {
            Ok(p) if p != 0 => p,
            _ => {
                return Err(ConfigError::InvalidPort {
                    key: DB_PORT,
                    value: raw_port,
                })
            }
        };

        let ssl_mode = match lookup(DB_SSLMODE).filter(|v| !v.trim().is_empty()) {
            Some(value) => PgSslMode::from_str(value.trim()).map_err(|source| {
                ConfigError::InvalidSslMode {
                    key: DB_SSLMODE,
                    value,
                    source,
                }
            })?,
            None => PgSslMode::Disable,
        };

        Ok(Self {
            host,
            port,
            user,
            dbname,
            password,
            ssl_mode,
        })
    }

    /// Connection options for sqlx.
    ///
    /// Built field by field rather than as a DSN string, so credentials
    /// containing spaces or `@` need no escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
            .ssl_mode(self.ssl_mode)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("dbname", &self.dbname)
            .field("password", &"<redacted>")
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}
