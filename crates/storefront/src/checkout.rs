//! Client-side checkout.
//!
//! Shipping and promotional discounts are computed here, on top of the cart
//! subtotal, and never written back into the cart. Placing an order is
//! simulated: it records the order and clears the cart.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use garments_core::{LineItem, Price};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::store::CartStore;

/// Checkout failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,

    #[error("invalid promo code: {0}")]
    InvalidPromoCode(String),

    #[error("unknown shipping method: {0} (expected standard, express or local-pickup)")]
    UnknownShippingMethod(String),
}

/// Delivery options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    LocalPickup,
}

impl ShippingMethod {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Express, Self::LocalPickup];

    #[must_use]
    pub const fn price(self) -> Price {
        match self {
            Self::Standard => Price::from_cents(500),
            Self::Express => Price::from_cents(1500),
            Self::LocalPickup => Price::ZERO,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard Shipping (3-6 business days)",
            Self::Express => "Express Shipping (1-2 business days)",
            Self::LocalPickup => "Local Pickup (1-2 days)",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Express => write!(f, "express"),
            Self::LocalPickup => write!(f, "local-pickup"),
        }
    }
}

impl FromStr for ShippingMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "local-pickup" | "localpickup" | "pickup" => Ok(Self::LocalPickup),
            _ => Err(CheckoutError::UnknownShippingMethod(s.to_owned())),
        }
    }
}

/// Promotional codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoCode {
    /// 10% off the subtotal.
    Save10,
    /// Shipping is free.
    #[serde(rename = "FREESHIP")]
    FreeShip,
    /// $10 off.
    #[serde(rename = "TENOFF50")]
    TenOff50,
}

impl PromoCode {
    /// Discount for an order with this subtotal and shipping price.
    #[must_use]
    pub fn discount(self, subtotal: Price, shipping: Price) -> Price {
        match self {
            Self::Save10 => subtotal.percent(10),
            Self::FreeShip => shipping,
            Self::TenOff50 => Price::from_cents(1000),
        }
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Save10 => write!(f, "SAVE10"),
            Self::FreeShip => write!(f, "FREESHIP"),
            Self::TenOff50 => write!(f, "TENOFF50"),
        }
    }
}

impl FromStr for PromoCode {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAVE10" => Ok(Self::Save10),
            "FREESHIP" => Ok(Self::FreeShip),
            "TENOFF50" => Ok(Self::TenOff50),
            _ => Err(CheckoutError::InvalidPromoCode(s.trim().to_owned())),
        }
    }
}

/// Order totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Price,
    pub shipping: Price,
    pub discount: Price,
    /// `subtotal + shipping - discount`, never below zero.
    pub total: Price,
}

impl Totals {
    #[must_use]
    pub fn compute(subtotal: Price, method: ShippingMethod, promo: Option<PromoCode>) -> Self {
        let shipping = method.price();
        let discount = promo.map_or(Price::ZERO, |code| code.discount(subtotal, shipping));
        Self {
            subtotal,
            shipping,
            discount,
            total: (subtotal + shipping).saturating_sub(discount),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: String,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub shipping_method: ShippingMethod,
    pub promo: Option<PromoCode>,
}

/// Totals for the current cart contents.
#[must_use]
pub fn quote(store: &CartStore, method: ShippingMethod, promo: Option<PromoCode>) -> Totals {
    Totals::compute(store.total_price(), method, promo)
}

/// Place an order for everything in the cart, then clear the cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if there is nothing to order.
#[instrument(skip(store))]
pub fn place_order(
    store: &mut CartStore,
    method: ShippingMethod,
    promo: Option<PromoCode>,
) -> Result<Order, CheckoutError> {
    if store.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let placed_at = Utc::now();
    let order = Order {
        id: format!("ORD-{}", placed_at.timestamp_millis()),
        placed_at,
        items: store.items().cloned().collect(),
        totals: quote(store, method, promo),
        shipping_method: method,
        promo,
    };

    store.clear_cart();
    info!(
        order_id = %order.id,
        lines = order.items.len(),
        total = %order.totals.total,
        "Order placed"
    );
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use garments_core::{AddItem, ProductId};

    use super::*;

    fn cents(c: u64) -> Price {
        Price::from_cents(c)
    }

    #[test]
    fn test_shipping_prices() {
        assert_eq!(ShippingMethod::Standard.price(), cents(500));
        assert_eq!(ShippingMethod::Express.price(), cents(1500));
        assert_eq!(ShippingMethod::LocalPickup.price(), Price::ZERO);
    }

    #[test]
    fn test_parse_shipping_method() {
        assert_eq!("Express".parse::<ShippingMethod>().unwrap(), ShippingMethod::Express);
        assert_eq!(
            "local-pickup".parse::<ShippingMethod>().unwrap(),
            ShippingMethod::LocalPickup
        );
        for method in ShippingMethod::ALL {
            assert_eq!(method.to_string().parse::<ShippingMethod>().unwrap(), method);
        }
        assert!(matches!(
            "drone".parse::<ShippingMethod>(),
            Err(CheckoutError::UnknownShippingMethod(_))
        ));
    }

    #[test]
    fn test_parse_promo_code_is_case_insensitive() {
        assert_eq!(" save10 ".parse::<PromoCode>().unwrap(), PromoCode::Save10);
        assert_eq!("FreeShip".parse::<PromoCode>().unwrap(), PromoCode::FreeShip);
        assert_eq!(
            "HALFOFF".parse::<PromoCode>().unwrap_err(),
            CheckoutError::InvalidPromoCode("HALFOFF".to_owned())
        );
    }

    #[test]
    fn test_totals_without_promo() {
        let totals = Totals::compute(cents(7500), ShippingMethod::Standard, None);
        assert_eq!(totals.discount, Price::ZERO);
        assert_eq!(totals.total, cents(8000));
    }

    #[test]
    fn test_save10_rounds_to_nearest_cent() {
        let totals = Totals::compute(cents(2499), ShippingMethod::LocalPickup, Some(PromoCode::Save10));
        assert_eq!(totals.discount, cents(250));
        assert_eq!(totals.total, cents(2249));
    }

    #[test]
    fn test_freeship_cancels_shipping() {
        let totals = Totals::compute(cents(4999), ShippingMethod::Express, Some(PromoCode::FreeShip));
        assert_eq!(totals.discount, cents(1500));
        assert_eq!(totals.total, cents(4999));
    }

    #[test]
    fn test_total_never_negative() {
        let totals = Totals::compute(cents(500), ShippingMethod::LocalPickup, Some(PromoCode::TenOff50));
        assert_eq!(totals.total, Price::ZERO);
    }

    #[test]
    fn test_place_order_on_empty_cart() {
        let mut store = CartStore::new();
        assert_eq!(
            place_order(&mut store, ShippingMethod::Standard, None).unwrap_err(),
            CheckoutError::EmptyCart
        );
    }

    #[test]
    fn test_place_order_clears_cart() {
        let mut store = CartStore::new();
        store.add_item(
            AddItem::new(ProductId::new(1), "Premium Cotton Shirt", cents(2500), 3).with_size("M"),
        );
        store.add_item(
            AddItem::new(ProductId::new(1), "Premium Cotton Shirt", cents(2500), 3).with_size("M"),
        );

        let order = place_order(&mut store, ShippingMethod::Standard, Some(PromoCode::Save10)).unwrap();
        assert!(order.id.starts_with("ORD-"));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.totals.subtotal, cents(5000));
        assert_eq!(order.totals.discount, cents(500));
        assert_eq!(order.totals.total, cents(5000));
        assert!(store.is_empty());
    }

    #[test]
    fn test_order_serializes_codes() {
        let order = Order {
            id: "ORD-1".to_owned(),
            placed_at: Utc::now(),
            items: Vec::new(),
            totals: Totals::compute(cents(100), ShippingMethod::LocalPickup, None),
            shipping_method: ShippingMethod::LocalPickup,
            promo: Some(PromoCode::FreeShip),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["shipping_method"], "local-pickup");
        assert_eq!(json["promo"], "FREESHIP");
        assert_eq!(json["totals"]["total"], 100);
    }
}
