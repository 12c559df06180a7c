//! Configuration management module.
//!
//! Supports loading configuration from:
//! - a `.env` file in the working directory (optional)
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `QA_BOARD__<SECTION>__<KEY>` pattern

mod server;
mod storage;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use server::ServerConfig;
pub use storage::{PostgresStorageConfig, StorageBackend, StorageConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `.env` is read into the process environment if present
    /// 2. `config/default.toml`
    /// 3. `config/{QA_BOARD_PROFILE}.toml` (if `QA_BOARD_PROFILE` is set)
    /// 4. Environment variables with `QA_BOARD__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is fine; deployments set the environment directly.
        dotenvy::dotenv().ok();

        let profile =
            std::env::var("QA_BOARD_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // QA_BOARD__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("QA_BOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_secs cannot be 0".to_string(),
            ));
        }

        self.storage.validate()?;

        if !matches!(self.observability.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::Message(format!(
                "observability.log_format must be \"text\" or \"json\", got \"{}\"",
                self.observability.log_format
            )));
        }

        Ok(())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 5);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.observability.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 9000
                request_timeout_secs = 2

                [storage]
                backend = "postgresql"

                [storage.postgresql]
                url = "postgres://qa:qa@localhost/qa"
                max_connections = 20
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.backend, StorageBackend::PostgreSQL);
        assert_eq!(config.storage.postgresql.max_connections, 20);
        assert_eq!(config.storage.postgresql.min_connections, 10);
        assert!(config.validate().is_ok());
    }
}
