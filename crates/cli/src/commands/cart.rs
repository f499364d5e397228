//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! garments cart add 2 --size L --color '#1E3A8A'
//! garments cart increase 2 --size L --color '#1E3A8A'
//! garments cart remove 2 --size L --color '#1E3A8A'
//! ```

use core::num::NonZeroU32;

use garments_core::{ProductId, VariantKey};
use garments_storefront::AppState;
use garments_storefront::error::Result;
use tracing::info;

/// Log each line and the cart totals.
pub fn show(state: &AppState) {
    let cart = state.cart();
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }
    for line in cart.items() {
        info!(
            "{} x {} [{}] @ {} = {}{}",
            line.quantity(),
            line.title(),
            line.key(),
            line.unit_price(),
            line.line_total(),
            if line.at_stock_limit() { " (max)" } else { "" }
        );
    }
    info!(
        "{} item(s), subtotal {}",
        cart.total_quantity(),
        cart.total_price()
    );
}

/// Add `quantity` units of a catalog variant.
///
/// # Errors
///
/// Returns an error if the product is unknown, out of stock, or the size or
/// color choice does not fit it.
pub fn add(
    state: &mut AppState,
    id: ProductId,
    size: Option<&str>,
    color: Option<&str>,
    quantity: NonZeroU32,
) -> Result<()> {
    let input = state.product(id)?.cart_input(size, color, quantity)?;
    let key = input.key();
    let before = line_quantity(state, &key);

    state.cart_mut().add_item(input);

    let after = line_quantity(state, &key);
    if after == before {
        info!("{key} is already at its stock limit of {after}");
    } else if after - before < quantity.get() {
        info!("Added {} of {key}, limited by stock ({after} in cart)", after - before);
    } else {
        info!("Added {} of {key} ({after} in cart)", quantity.get());
    }
    show(state);
    Ok(())
}

/// Remove a line.
pub fn remove(state: &mut AppState, key: VariantKey) {
    if state.cart_mut().remove_item(key.clone()) {
        info!("Removed {key}");
        show(state);
    } else {
        info!("{key} is not in the cart");
    }
}

/// Add one unit to a line.
pub fn increase(state: &mut AppState, key: VariantKey) {
    if state.cart_mut().increase_quantity(key.clone()) {
        info!("{key} now at {}", line_quantity(state, &key));
    } else if line_quantity(state, &key) == 0 {
        info!("{key} is not in the cart");
    } else {
        info!("{key} is already at its stock limit");
    }
}

/// Take one unit off a line.
pub fn decrease(state: &mut AppState, key: VariantKey) {
    if state.cart_mut().decrease_quantity(key.clone()) {
        info!("{key} now at {}", line_quantity(state, &key));
    } else if line_quantity(state, &key) == 0 {
        info!("{key} is not in the cart");
    } else {
        info!("{key} is already at 1; use `garments cart remove` to drop it");
    }
}

/// Empty the cart.
pub fn clear(state: &mut AppState) {
    if state.cart_mut().clear_cart() {
        info!("Cart cleared");
    } else {
        info!("Your cart is already empty");
    }
}

/// Build the key for a variant, matching size and color to the spelling the
/// catalog uses so `m` finds the `M` line.
pub fn variant_key(
    state: &AppState,
    id: ProductId,
    size: Option<String>,
    color: Option<String>,
) -> VariantKey {
    let product = state.catalog().find(id);
    let canonical = |choice: Option<String>, offered: Option<&[String]>| {
        choice.map(|value| {
            offered
                .and_then(|values| values.iter().find(|o| o.eq_ignore_ascii_case(&value)))
                .cloned()
                .unwrap_or(value)
        })
    };
    VariantKey {
        product_id: id,
        size: canonical(size, product.map(|p| p.sizes.as_slice())),
        color: canonical(color, product.map(|p| p.colors.as_slice())),
    }
}

fn line_quantity(state: &AppState, key: &VariantKey) -> u32 {
    state.cart().cart().get(key).map_or(0, |line| line.quantity())
}
