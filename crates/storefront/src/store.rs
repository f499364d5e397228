//! The cart store: the single owner of cart state.
//!
//! Every change goes through [`CartStore::dispatch`], which applies a
//! [`CartAction`] to the [`Cart`] and then hands the new state to each
//! subscribed [`CartObserver`]. Reads go through the selector methods, so
//! totals are always derived from the current lines.
//!
//! The store is an ordinary owned value. Construct one at startup (usually
//! through [`crate::persistence::open_cart_store`]) and pass it by reference
//! to whatever needs it.

use garments_core::{AddItem, Cart, CartAction, CartSnapshot, LineItem, Price, VariantKey};
use tracing::{debug, instrument, warn};

/// Receives the cart after every change.
///
/// Observers run synchronously, in subscription order, after the transition
/// has already been applied. They cannot veto or roll back a change.
pub trait CartObserver {
    fn cart_changed(&self, cart: &Cart);
}

impl<F: Fn(&Cart)> CartObserver for F {
    fn cart_changed(&self, cart: &Cart) {
        self(cart);
    }
}

/// Owner of the cart and its observers.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    observers: Vec<Box<dyn CartObserver>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CartStore {
    /// Create an empty store with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for all later changes.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Apply an action and notify observers if any line changed.
    ///
    /// Returns whether the cart changed.
    #[instrument(skip_all, fields(action = action.name()))]
    pub fn dispatch(&mut self, action: CartAction) -> bool {
        let changed = self.cart.apply(action);
        if changed {
            debug!(
                lines = self.cart.len(),
                total_quantity = self.cart.total_quantity(),
                "Cart updated"
            );
            for observer in &self.observers {
                observer.cart_changed(&self.cart);
            }
        } else {
            debug!("Cart unchanged");
        }
        changed
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add units of a variant, capped at the line's stock snapshot.
    pub fn add_item(&mut self, input: AddItem) -> bool {
        self.dispatch(CartAction::Add(input))
    }

    /// Remove a line. Absent lines are ignored.
    pub fn remove_item(&mut self, key: VariantKey) -> bool {
        self.dispatch(CartAction::Remove(key))
    }

    /// Add one unit to a line unless it is at its stock snapshot.
    pub fn increase_quantity(&mut self, key: VariantKey) -> bool {
        self.dispatch(CartAction::Increase(key))
    }

    /// Remove one unit from a line unless it is at quantity 1.
    pub fn decrease_quantity(&mut self, key: VariantKey) -> bool {
        self.dispatch(CartAction::Decrease(key))
    }

    /// Drop every line.
    pub fn clear_cart(&mut self) -> bool {
        self.dispatch(CartAction::Clear)
    }

    /// Replace the cart with a persisted snapshot.
    ///
    /// A snapshot that breaks any line invariant is ignored as a whole and
    /// the cart is left untouched. Returns whether the snapshot was loaded.
    pub fn replace_cart(&mut self, snapshot: CartSnapshot) -> bool {
        match Cart::try_from(snapshot) {
            Ok(cart) => {
                self.dispatch(CartAction::Replace(cart));
                true
            }
            Err(e) => {
                warn!(error = %e, "Ignoring malformed cart snapshot");
                false
            }
        }
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// Read-only view of the whole cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in display order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &LineItem> {
        self.cart.items()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Sum of `unit_price * quantity`.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}
