//! The cart aggregate.
//!
//! A [`Cart`] is an ordered map from [`VariantKey`] to [`LineItem`]. It only
//! changes through [`Cart::apply`], a pure state transition that takes a
//! [`CartAction`]; totals are always recomputed from the lines.
//!
//! # Invariants
//!
//! - At most one line per variant key.
//! - Every line has `1 <= quantity <= stock_limit`.
//! - A line never sits at quantity zero; it is either present or removed.
//!
//! ```
//! use garments_core::{AddItem, Cart, CartAction, Price, ProductId, VariantKey};
//!
//! let mut cart = Cart::default();
//! let shirt = AddItem::new(ProductId::new(1), "Shirt", Price::from_cents(2500), 3).with_size("M");
//! cart.apply(CartAction::Add(shirt.clone()));
//! cart.apply(CartAction::Add(shirt));
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_price(), Price::from_cents(5000));
//!
//! cart.apply(CartAction::Remove(VariantKey::product(ProductId::new(1)).with_size("M")));
//! assert!(cart.is_empty());
//! ```

mod line_item;
mod snapshot;

use indexmap::IndexMap;

pub use line_item::{AddItem, LineItem};
pub use snapshot::{CartSnapshot, SnapshotError};

use crate::types::{Price, VariantKey};

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add units of a variant, merging with an existing line and capping at
    /// the line's stock snapshot.
    Add(AddItem),
    /// Delete a line. Absent lines are ignored.
    Remove(VariantKey),
    /// Add one unit unless the line is at its stock snapshot.
    Increase(VariantKey),
    /// Remove one unit unless the line is at quantity 1.
    Decrease(VariantKey),
    /// Drop every line.
    Clear,
    /// Replace every line with an already validated cart.
    Replace(Cart),
}

impl CartAction {
    /// Short action name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add_item",
            Self::Remove(_) => "remove_item",
            Self::Increase(_) => "increase_quantity",
            Self::Decrease(_) => "decrease_quantity",
            Self::Clear => "clear_cart",
            Self::Replace(_) => "replace_cart",
        }
    }
}

/// Ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: IndexMap<VariantKey, LineItem>,
}

impl Cart {
    /// Apply one action and report whether any line changed.
    ///
    /// Never fails: actions on absent lines, increases past the stock
    /// snapshot, decreases below one and adds of an out-of-stock product
    /// leave the cart as it was.
    pub fn apply(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::Add(input) => self.add(input),
            CartAction::Remove(key) => self.items.shift_remove(&key).is_some(),
            CartAction::Increase(key) => self.items.get_mut(&key).is_some_and(|line| {
                if line.quantity < line.stock_limit() {
                    line.quantity += 1;
                    true
                } else {
                    false
                }
            }),
            CartAction::Decrease(key) => self.items.get_mut(&key).is_some_and(|line| {
                if line.quantity > 1 {
                    line.quantity -= 1;
                    true
                } else {
                    false
                }
            }),
            CartAction::Clear => {
                let changed = !self.items.is_empty();
                self.items.clear();
                changed
            }
            CartAction::Replace(cart) => {
                // Order counts: the same lines in a new order is a change.
                let changed = !self.items.iter().eq(cart.items.iter());
                *self = cart;
                changed
            }
        }
    }

    fn add(&mut self, input: AddItem) -> bool {
        let key = input.key();
        if let Some(line) = self.items.get_mut(&key) {
            // The first stock snapshot wins; the input's stock is ignored.
            let quantity = line
                .quantity
                .saturating_add(input.quantity.get())
                .min(line.stock_limit());
            let changed = quantity != line.quantity;
            line.quantity = quantity;
            return changed;
        }

        if input.stock_limit == 0 {
            return false;
        }
        let quantity = input.quantity.get().min(input.stock_limit);
        self.items.insert(key, LineItem::from_input(input, quantity));
        true
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &LineItem> {
        self.items.values()
    }

    /// Look up a single line.
    #[must_use]
    pub fn get(&self, key: &VariantKey) -> Option<&LineItem> {
        self.items.get(key)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.values().map(|line| u64::from(line.quantity())).sum()
    }

    /// Sum of `unit_price * quantity` over every line.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.values().map(LineItem::line_total).sum()
    }

    /// Serializable copy of the current lines.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self)
    }
}
