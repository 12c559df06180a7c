//! Application state for Axum handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Storage;

/// Shared application state.
///
/// The storage pool is the only shared resource between requests.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Storage backend.
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn Storage>) -> Self {
        Self { config, storage }
    }
}
