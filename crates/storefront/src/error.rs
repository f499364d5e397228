//! Unified error handling.
//!
//! Provides an application-level `AppError` for front ends that drive the
//! storefront. The cart operations themselves never fail; these errors come
//! from configuration, catalog lookups, variant selection and checkout.

use garments_core::ProductId;
use thiserror::Error;

use crate::catalog::SelectionError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Requested variant cannot be added.
    #[error("{0}")]
    Selection(#[from] SelectionError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Product is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::ProductNotFound(ProductId::new(123));
        assert_eq!(err.to_string(), "Product not found: 123");

        let err = AppError::BadRequest("quantity must be at least 1".to_string());
        assert_eq!(err.to_string(), "Bad request: quantity must be at least 1");
    }

    #[test]
    fn test_app_error_from_checkout() {
        let err: AppError = CheckoutError::EmptyCart.into();
        assert_eq!(err.to_string(), "Checkout error: your cart is empty");
    }

    #[test]
    fn test_selection_error_is_shown_verbatim() {
        let err: AppError = SelectionError::OutOfStock {
            title: "Canvas Tote Bag".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Canvas Tote Bag is out of stock");
    }
}
