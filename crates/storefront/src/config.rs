//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GARMENTS_DATA_DIR` - Directory for locally stored data (default: `.garments`)
//! - `GARMENTS_CART_KEY` - Storage key for the cart (default: `cart`)
//! - `GARMENTS_DEFAULT_SHIPPING` - Checkout shipping method when none is given
//!   (`standard`, `express` or `local-pickup`; default: `standard`)

use std::path::PathBuf;

use thiserror::Error;

use crate::checkout::ShippingMethod;
use crate::persistence::CART_KEY;
use crate::storage::validate_key;

const DEFAULT_DATA_DIR: &str = ".garments";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the local key-value store
    pub data_dir: PathBuf,
    /// Key the cart snapshot is stored under
    pub cart_key: String,
    /// Shipping method used when checkout does not name one
    pub default_shipping: ShippingMethod,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: CART_KEY.to_owned(),
            default_shipping: ShippingMethod::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_or_default(&lookup, "GARMENTS_DATA_DIR", DEFAULT_DATA_DIR));

        let cart_key = get_or_default(&lookup, "GARMENTS_CART_KEY", CART_KEY);
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("GARMENTS_CART_KEY".to_string(), e.to_string())
        })?;

        let default_shipping = get_or_default(&lookup, "GARMENTS_DEFAULT_SHIPPING", "standard")
            .parse::<ShippingMethod>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GARMENTS_DEFAULT_SHIPPING".to_string(), e.to_string())
            })?;

        Ok(Self {
            data_dir,
            cart_key,
            default_shipping,
        })
    }
}

/// Get a variable with a default value. Empty values count as unset.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
