//! Application state shared across pages.

use std::sync::Arc;

use gamehub_core::{CartStore, KeyValueStore, OrderStore};

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::storage::FileStore;

/// Application state shared across all pages.
///
/// This struct is cheaply cloneable via `Arc`. The cart and order stores
/// share one backend.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    carts: CartStore,
    orders: OrderStore,
}

impl AppState {
    /// Create application state persisting to `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// catalog client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, AppError> {
        let store = FileStore::open(&config.data_dir).map_err(|source| {
            gamehub_core::StorageError::Io {
                key: config.data_dir.display().to_string(),
                source,
            }
        })?;
        Ok(Self::with_store(config, Arc::new(store))?)
    }

    /// Create application state over an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn with_store(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts: CartStore::new(store.clone()),
                orders: OrderStore::new(store),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("data_dir", &self.inner.config.data_dir)
            .field("catalog", &self.inner.catalog)
            .finish_non_exhaustive()
    }
}
