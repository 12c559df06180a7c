//! Storage backend factory.
//!
//! Creates the appropriate storage backend based on configuration.

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::StorageResult;
use crate::storage::memory::MemoryStorage;
use crate::storage::postgres::PgStorage;
use crate::storage::traits::Storage;

/// Create a storage backend based on configuration.
///
/// For `PostgreSQL` this connects (with retries) and applies migrations
/// before returning.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be initialized.
pub async fn create_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageBackend::PostgreSQL => {
            let storage = PgStorage::connect(&config.postgresql).await?;
            storage.migrate(&config.postgresql).await?;

            // Verify storage is healthy
            storage.health_check().await?;

            Ok(Arc::new(storage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_storage() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_name(), "memory");
        assert!(storage.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_create_postgres_storage_unreachable() {
        let mut config = StorageConfig {
            backend: StorageBackend::PostgreSQL,
            ..Default::default()
        };
        config.postgresql.url = "postgres://qa:qa@127.0.0.1:1/qa".to_string();
        config.postgresql.connect_retries = 1;
        config.postgresql.acquire_timeout = 1;

        let result = create_storage(&config).await;
        assert!(result.is_err());
    }
}
