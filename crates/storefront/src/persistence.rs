//! Best-effort persistence of the cart to local storage.
//!
//! The cart is loaded once when the store is opened and written back in full
//! after every change by a [`CartPersister`] observer. Neither direction ever
//! fails the caller: a corrupt snapshot loads as an empty cart, and a failed
//! write leaves the in-memory cart as the authority for the rest of the
//! session. Both are logged as warnings.

use std::sync::Arc;

use garments_core::{Cart, CartSnapshot};
use tracing::{debug, info, warn};

use crate::storage::{KeyValueStorage, StorageError};
use crate::store::{CartObserver, CartStore};

/// Default storage key for the cart.
pub const CART_KEY: &str = "cart";

/// Observer that writes the full cart snapshot after each change.
#[derive(Debug)]
pub struct CartPersister<S> {
    storage: Arc<S>,
    key: String,
}

impl<S: KeyValueStorage> CartPersister<S> {
    #[must_use]
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Serialize and write the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let json = cart.snapshot().to_json()?;
        self.storage.set_item(&self.key, &json)
    }
}

impl<S: KeyValueStorage> CartObserver for CartPersister<S> {
    fn cart_changed(&self, cart: &Cart) {
        match self.save(cart) {
            Ok(()) => debug!(key = %self.key, lines = cart.len(), "Cart saved"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to save cart"),
        }
    }
}

/// Read the stored snapshot, if there is a parseable one.
///
/// Missing data is `None`. Unreadable storage and unparseable text are
/// logged and also yield `None`.
pub fn load_snapshot<S: KeyValueStorage>(storage: &S, key: &str) -> Option<CartSnapshot> {
    let json = match storage.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => {
            debug!(key, "No saved cart");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read saved cart");
            return None;
        }
    };

    match CartSnapshot::from_json(&json) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(key, error = %e, "Ignoring malformed saved cart");
            None
        }
    }
}

/// Create the cart store for a session.
///
/// Rehydrates once from `storage` under `key`, then subscribes a
/// [`CartPersister`] so every later change is written back. The initial load
/// does not trigger a write.
pub fn open_cart_store<S: KeyValueStorage + 'static>(storage: Arc<S>, key: &str) -> CartStore {
    let mut store = CartStore::new();
    let restored = load_snapshot(storage.as_ref(), key)
        .is_some_and(|snapshot| store.replace_cart(snapshot));
    if restored {
        info!(
            key,
            lines = store.cart().len(),
            total_quantity = store.total_quantity(),
            "Cart restored"
        );
    }
    store.subscribe(CartPersister::new(storage, key));
    store
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use garments_core::{AddItem, Price, ProductId, VariantKey};

    use super::*;
    use crate::storage::MemoryStorage;

    fn shirt() -> AddItem {
        AddItem::new(ProductId::new(1), "Premium Cotton Shirt", Price::from_cents(2500), 3)
            .with_size("M")
            .with_color("#000000")
    }

    #[test]
    fn test_every_change_is_written() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = open_cart_store(Arc::clone(&storage), CART_KEY);
        store.add_item(shirt());

        let saved = storage.get_item(CART_KEY).unwrap().unwrap();
        let snapshot = CartSnapshot::from_json(&saved).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items.first().unwrap().quantity(), 1);

        store.clear_cart();
        let saved = storage.get_item(CART_KEY).unwrap().unwrap();
        assert_eq!(saved, r#"{"items":[]}"#);
    }

    #[test]
    fn test_reopen_restores_cart() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = open_cart_store(Arc::clone(&storage), CART_KEY);
            store.add_item(shirt());
            store.add_item(shirt());
        }
        let store = open_cart_store(storage, CART_KEY);
        let key = VariantKey::product(ProductId::new(1))
            .with_size("M")
            .with_color("#000000");
        assert_eq!(store.cart().get(&key).unwrap().quantity(), 2);
        assert_eq!(store.total_price(), Price::from_cents(5000));
    }

    #[test]
    fn test_corrupt_snapshot_opens_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert(CART_KEY, "{not json");
        let store = open_cart_store(Arc::clone(&storage), CART_KEY);
        assert!(store.is_empty());
        // Opening does not overwrite what was there.
        assert_eq!(storage.get_item(CART_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_invalid_lines_open_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert(
            CART_KEY,
            r#"{"items":[{"id":1,"title":"Shirt","price":2500,"quantity":9,"stock":3}]}"#,
        );
        let store = open_cart_store(storage, CART_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let storage = Arc::new(MemoryStorage::with_quota(10));
        let mut store = open_cart_store(Arc::clone(&storage), CART_KEY);
        assert!(store.add_item(shirt()));
        assert_eq!(store.total_quantity(), 1);
        assert_eq!(storage.get_item(CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_disabled_storage_is_usable() {
        let storage = Arc::new(MemoryStorage::disabled());
        let mut store = open_cart_store(storage, CART_KEY);
        store.add_item(shirt());
        store.increase_quantity(
            VariantKey::product(ProductId::new(1))
                .with_size("M")
                .with_color("#000000"),
        );
        assert_eq!(store.total_quantity(), 2);
    }

    #[test]
    fn test_save_reports_errors() {
        let storage = Arc::new(MemoryStorage::disabled());
        let persister = CartPersister::new(storage, CART_KEY);
        assert!(matches!(
            persister.save(&Cart::default()),
            Err(StorageError::Unavailable)
        ));
    }
}
