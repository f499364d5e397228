//! Checkout command.

use garments_storefront::AppState;
use garments_storefront::checkout::{PromoCode, ShippingMethod, place_order};
use garments_storefront::error::Result;
use tracing::info;

/// Place the order and report its totals.
///
/// Falls back to the configured default shipping method when `shipping` is
/// not given.
///
/// # Errors
///
/// Returns an error if the shipping method or promo code is not recognized,
/// or the cart is empty.
pub fn run(state: &mut AppState, shipping: Option<&str>, promo: Option<&str>) -> Result<()> {
    let method = match shipping {
        Some(name) => name.parse::<ShippingMethod>()?,
        None => state.config().default_shipping,
    };
    let promo = promo.map(str::parse::<PromoCode>).transpose()?;

    let order = place_order(state.cart_mut(), method, promo)?;

    info!("Order {} placed", order.id);
    for line in &order.items {
        info!("  {} x {} [{}] = {}", line.quantity(), line.title(), line.key(), line.line_total());
    }
    info!("Subtotal: {}", order.totals.subtotal);
    info!("Shipping: {} ({})", order.totals.shipping, method.label());
    if let Some(code) = order.promo {
        info!("Discount: -{} ({code})", order.totals.discount);
    }
    info!("Total: {}", order.totals.total);
    Ok(())
}
