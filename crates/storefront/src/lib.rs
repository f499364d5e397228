//! Sajid Garments storefront library.
//!
//! This crate owns the shopping cart for a session: the [`store::CartStore`]
//! that applies cart actions, best-effort persistence of the cart to local
//! key-value storage, and the catalog and checkout logic that sit on either
//! side of it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, Product, SelectionError};
pub use checkout::{CheckoutError, Order, PromoCode, ShippingMethod, Totals};
pub use config::{ConfigError, StorefrontConfig};
pub use error::AppError;
pub use persistence::{CART_KEY, CartPersister, open_cart_store};
pub use state::AppState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CartObserver, CartStore};
