//! Persisted cart format.
//!
//! The cart is stored as `{ "items": [LineItem, ...] }` with no version
//! field. A snapshot is only turned back into a [`Cart`] once every line has
//! been checked against the line invariants; anything else is rejected as a
//! whole.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Cart, LineItem};
use crate::types::VariantKey;

/// Reasons a persisted snapshot cannot be loaded.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    /// The stored text is not a `{ items: [...] }` object.
    #[error("snapshot is not valid cart JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A line is stored with quantity zero.
    #[error("line {key} has quantity 0")]
    ZeroQuantity {
        /// Offending line.
        key: VariantKey,
    },
    /// A line holds more than its stock snapshot allows.
    #[error("line {key} has quantity {quantity} above stock {stock}")]
    ExceedsStock {
        /// Offending line.
        key: VariantKey,
        /// Stored quantity.
        quantity: u32,
        /// Stored stock snapshot.
        stock: u32,
    },
    /// Two lines share a variant key.
    #[error("line {key} appears more than once")]
    DuplicateVariant {
        /// Offending line.
        key: VariantKey,
    },
}

/// Serialized form of a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Lines in display order. A missing or `null` list is an empty cart.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<LineItem>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<LineItem>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl CartSnapshot {
    /// Parse a snapshot from its stored JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] if the text is not a cart object.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this snapshot to JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().cloned().collect(),
        }
    }
}

impl TryFrom<CartSnapshot> for Cart {
    type Error = SnapshotError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        let mut items = IndexMap::with_capacity(snapshot.items.len());
        for line in snapshot.items {
            let key = line.key();
            if line.quantity() == 0 {
                return Err(SnapshotError::ZeroQuantity { key });
            }
            if line.quantity() > line.stock_limit() {
                return Err(SnapshotError::ExceedsStock {
                    key,
                    quantity: line.quantity(),
                    stock: line.stock_limit(),
                });
            }
            match items.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(SnapshotError::DuplicateVariant {
                        key: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(line);
                }
            }
        }
        Ok(Self { items })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn line_json(id: u32, size: &str, quantity: u32, stock: u32) -> String {
        format!(
            r#"{{"id":{id},"title":"Shirt","price":2500,"quantity":{quantity},"stock":{stock},"sku":"S","images":[],"size":"{size}"}}"#
        )
    }

    #[test]
    fn test_valid_snapshot_loads_in_order() {
        let json = format!(
            r#"{{"items":[{},{}]}}"#,
            line_json(1, "M", 2, 3),
            line_json(1, "L", 1, 3)
        );
        let cart = Cart::try_from(CartSnapshot::from_json(&json).unwrap()).unwrap();
        let sizes: Vec<_> = cart.items().map(|line| line.size().unwrap()).collect();
        assert_eq!(sizes, ["M", "L"]);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_price(), Price::from_cents(7500));
    }

    #[test]
    fn test_missing_items_is_empty() {
        let snapshot = CartSnapshot::from_json("{}").unwrap();
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_null_items_is_empty() {
        let snapshot = CartSnapshot::from_json(r#"{"items":null}"#).unwrap();
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(
            CartSnapshot::from_json("[1,2,3]"),
            Err(SnapshotError::Parse(_))
        ));
        assert!(matches!(
            CartSnapshot::from_json("not json"),
            Err(SnapshotError::Parse(_))
        ));
        assert!(matches!(
            CartSnapshot::from_json(r#"{"items":"oops"}"#),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let json = format!(r#"{{"items":[{}]}}"#, line_json(1, "M", 0, 3));
        let err = Cart::try_from(CartSnapshot::from_json(&json).unwrap()).unwrap_err();
        assert!(matches!(err, SnapshotError::ZeroQuantity { .. }));
    }

    #[test]
    fn test_over_stock_is_rejected() {
        let json = format!(r#"{{"items":[{}]}}"#, line_json(1, "M", 4, 3));
        let err = Cart::try_from(CartSnapshot::from_json(&json).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::ExceedsStock {
                quantity: 4,
                stock: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_variant_is_rejected() {
        let json = format!(
            r#"{{"items":[{},{}]}}"#,
            line_json(1, "M", 1, 3),
            line_json(1, "M", 2, 3)
        );
        let err = Cart::try_from(CartSnapshot::from_json(&json).unwrap()).unwrap_err();
        match err {
            SnapshotError::DuplicateVariant { key } => {
                assert_eq!(key, VariantKey::product(ProductId::new(1)).with_size("M"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_snapshot_of_cart_reloads_to_same_cart() {
        let json = format!(
            r#"{{"items":[{},{}]}}"#,
            line_json(2, "S", 1, 5),
            line_json(3, "XL", 5, 5)
        );
        let cart = Cart::try_from(CartSnapshot::from_json(&json).unwrap()).unwrap();
        let text = CartSnapshot::from(&cart).to_json().unwrap();
        let reloaded = Cart::try_from(CartSnapshot::from_json(&text).unwrap()).unwrap();
        assert_eq!(reloaded, cart);
    }
}
