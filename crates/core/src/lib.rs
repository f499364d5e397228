//! Sajid Garments Core - Shared types and the cart state machine.
//!
//! This crate provides the types used across all storefront components:
//! - `storefront` - Cart store, persistence, catalog and checkout
//! - `cli` - Command-line front end for browsing and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage access, no logging. Persisting the cart is the job of an
//! observer that lives in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and variant keys
//! - [`cart`] - Line items, cart actions and the persisted snapshot format

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{AddItem, Cart, CartAction, CartSnapshot, LineItem, SnapshotError};
pub use types::*;
