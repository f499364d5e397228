//! Session state for a storefront front end.

use std::sync::Arc;

use garments_core::ProductId;

use crate::catalog::{Catalog, Product};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::persistence::open_cart_store;
use crate::storage::{FileStorage, KeyValueStorage};
use crate::store::CartStore;

/// Everything one storefront session works with.
///
/// The cart store is opened from storage when the state is built, so the
/// saved cart is restored before any front end code reads it.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
}

impl AppState {
    /// Create state backed by files under `config.data_dir`.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
        Self::with_storage(config, catalog, storage)
    }

    /// Create state backed by the given storage.
    pub fn with_storage<S: KeyValueStorage + 'static>(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: Arc<S>,
    ) -> Self {
        let cart = open_cart_store(storage, &config.cart_key);
        Self {
            config,
            catalog,
            cart,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get the product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ProductNotFound`] if the catalog has no such product.
    pub fn product(&self, id: ProductId) -> Result<&Product> {
        self.catalog.find(id).ok_or(AppError::ProductNotFound(id))
    }

    /// Get the cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Get the cart store for changes.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }
}
