//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod variant;

pub use id::{IdError, ProductId};
pub use price::Price;
pub use variant::VariantKey;
