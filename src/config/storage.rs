//! Storage configuration.

use std::path::PathBuf;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;

/// Storage backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process storage (development and tests).
    #[default]
    Memory,
    /// `PostgreSQL` storage.
    #[serde(rename = "postgresql")]
    PostgreSQL,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::PostgreSQL => write!(f, "postgresql"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type.
    #[serde(default)]
    pub backend: StorageBackend,

    /// `PostgreSQL` storage configuration.
    #[serde(default)]
    pub postgresql: PostgresStorageConfig,
}

impl StorageConfig {
    /// Validate the storage configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration fields are missing for the selected backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.backend {
            StorageBackend::Memory => Ok(()),
            StorageBackend::PostgreSQL => {
                if self.postgresql.url.is_empty() {
                    return Err(ConfigError::Message(
                        "storage.postgresql.url cannot be empty".to_string(),
                    ));
                }
                if self.postgresql.max_connections == 0 {
                    return Err(ConfigError::Message(
                        "storage.postgresql.max_connections cannot be 0".to_string(),
                    ));
                }
                if self.postgresql.min_connections > self.postgresql.max_connections {
                    return Err(ConfigError::Message(
                        "storage.postgresql.min_connections cannot exceed max_connections"
                            .to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// `PostgreSQL` storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresStorageConfig {
    /// `PostgreSQL` connection URL.
    #[serde(default)]
    pub url: String,

    /// Connections kept open while idle.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Upper bound on open connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Timeout for acquiring a pooled connection, in seconds.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,

    /// Idle connections are closed after this many seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,

    /// Connections are recycled after this many seconds.
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime: u64,

    /// Connection attempts made at startup, one second apart.
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Directory holding SQL migrations.
    #[serde(default = "default_migrations_path")]
    pub migrations_path: PathBuf,
}

impl PostgresStorageConfig {
    /// Acquire timeout as a duration.
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout)
    }

    /// Idle timeout as a duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }

    /// Maximum connection lifetime as a duration.
    #[must_use]
    pub const fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime)
    }
}

const fn default_min_connections() -> u32 {
    10
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_acquire_timeout() -> u64 {
    5
}

const fn default_idle_timeout() -> u64 {
    600
}

const fn default_max_lifetime() -> u64 {
    60 * 60
}

const fn default_connect_retries() -> u32 {
    30
}

fn default_migrations_path() -> PathBuf {
    PathBuf::from("./migrations")
}

impl Default for PostgresStorageConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout: default_acquire_timeout(),
            idle_timeout: default_idle_timeout(),
            max_lifetime: default_max_lifetime(),
            connect_retries: default_connect_retries(),
            migrations_path: default_migrations_path(),
        }
    }
}
