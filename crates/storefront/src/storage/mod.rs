//! Local, single-device key-value storage.
//!
//! The cart is cached in a small synchronous string store, the same shape as
//! browser local storage: `get_item`, `set_item`, `remove_item`. Two
//! implementations are provided:
//!
//! - [`FileStorage`] - one JSON file per key under a data directory
//! - [`MemoryStorage`] - a process-local map, with knobs for simulating a
//!   full or disabled store in tests

mod file;

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;

pub use file::FileStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The value does not fit in the remaining quota.
    #[error("quota exceeded writing {size} bytes to {key} (quota {quota} bytes)")]
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },

    /// Storage is switched off.
    #[error("storage is unavailable")]
    Unavailable,

    /// The key cannot be used as a storage name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A synchronous string key-value store.
///
/// Methods take `&self`; backends use interior mutability so one handle can
/// be shared between the cart observer and whoever rehydrates the cart.
pub trait KeyValueStorage {
    /// Read a value. A missing key is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Validate a storage key: non-empty ASCII letters, digits, `-` and `_`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for anything else.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects any single value longer than `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Create a store whose every operation fails with
    /// [`StorageError::Unavailable`].
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Seed a value directly, bypassing quota and availability checks.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.lock().insert(key.into(), value.into());
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable);
        }
        if let Some(quota) = self.quota.filter(|&quota| value.len() > quota) {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
                size: value.len(),
                quota,
            });
        }
        self.entries.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable);
        }
        self.entries.lock().remove(key);
        Ok(())
    }
}
