//! Integration tests for the Sajid Garments storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p garments-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart store behavior through persistence and checkout
//! - `cart_properties` - Invariants over random action sequences (`proptest`)
//!
//! Shared fixtures live here.

#![cfg_attr(not(test), forbid(unsafe_code))]

use garments_core::{AddItem, Price, ProductId, VariantKey};

/// Unit price used by the fixtures, in cents.
pub const UNIT_PRICE: u64 = 2500;

/// Stock snapshot used by the fixtures.
pub const STOCK: u32 = 3;

/// Product 1 with the given size and color, 2500 cents, stock 3.
#[must_use]
pub fn product_one(size: &str, color: &str) -> AddItem {
    AddItem::new(ProductId::new(1), "Premium Cotton Shirt", Price::from_cents(UNIT_PRICE), STOCK)
        .with_sku("SG-SHIRT-001")
        .with_images(["/images/SG-SHIRT-001-front.png"])
        .with_size(size)
        .with_color(color)
}

/// Product 2 in the given size, 2500 cents, stock 3.
#[must_use]
pub fn product_two(size: &str) -> AddItem {
    AddItem::new(ProductId::new(2), "Casual Denim Jacket", Price::from_cents(UNIT_PRICE), STOCK)
        .with_size(size)
}

/// Key for a sized and colored variant.
#[must_use]
pub fn key(id: u32, size: &str, color: Option<&str>) -> VariantKey {
    VariantKey::new(ProductId::new(id), Some(size), color)
}
