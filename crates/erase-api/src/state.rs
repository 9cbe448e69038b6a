//! Application state.

use std::sync::Arc;

use erase_storage::{ArtifactStore, CosClient};

use crate::config::ApiConfig;

/// Shared application state.
///
/// The storage client is a process-wide collaborator, safe for concurrent
/// use; everything per-request is transient.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<dyn ArtifactStore>,
}

impl AppState {
    /// Create new application state with the production storage client.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = CosClient::from_env()?;
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    /// Build state around an explicit store. Used by the test suite to
    /// inject a fake storage client.
    pub fn with_store(config: ApiConfig, store: Arc<dyn ArtifactStore>) -> Self {
        Self { config, store }
    }
}
