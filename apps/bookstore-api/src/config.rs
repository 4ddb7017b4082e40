//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

/// Catalog server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// SQLite pool size
    pub max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                    | Default          |
    /// |-----------------------------|------------------|
    /// | `BOOKSTORE_HOST`            | `0.0.0.0`        |
    /// | `BOOKSTORE_PORT`            | `5071`           |
    /// | `BOOKSTORE_DATABASE`        | `./bookstore.db` |
    /// | `BOOKSTORE_MAX_CONNECTIONS` | `5`              |
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            host: lookup("BOOKSTORE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("BOOKSTORE_PORT")
                .unwrap_or_else(|| "5071".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BOOKSTORE_PORT".to_string()))?,

            database_path: lookup("BOOKSTORE_DATABASE")
                .unwrap_or_else(|| "./bookstore.db".to_string())
                .into(),

            max_connections: lookup("BOOKSTORE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BOOKSTORE_MAX_CONNECTIONS".to_string()))?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "BOOKSTORE_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
