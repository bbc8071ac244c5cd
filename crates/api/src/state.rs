//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::WebshopConfig;
use crate::db::{self, DocumentStore, StoreError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the injected
/// document store client. No other state survives between requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebshopConfig,
    store: DocumentStore,
}

impl AppState {
    /// Create application state from pre-built parts.
    #[must_use]
    pub fn new(config: WebshopConfig, store: DocumentStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Build state from configuration, creating the lazy store pool when a
    /// connection string is present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the connection string fails to parse. An
    /// absent connection string is not an error; the store client stays
    /// unconfigured.
    pub fn from_config(config: WebshopConfig) -> Result<Self, StoreError> {
        let pool = match &config.database_url {
            Some(url) => Some(db::create_pool(url)?),
            None => None,
        };
        let store = DocumentStore::new(pool, config.database_name.clone());

        Ok(Self::new(config, store))
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &WebshopConfig {
        &self.inner.config
    }

    /// Get a reference to the document store client.
    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }
}
