//! Variant identity of a cart line.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Identity of one purchasable variant: product, size and color.
///
/// Two lines for the same product with a different size or color are
/// different variants. A missing dimension (a product without sizes, say)
/// is a fixed "no value" and matches only another missing value.
///
/// The key is structured rather than concatenated, so a product `1` in size
/// `M` can never be confused with some product whose id renders as `1-M`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl VariantKey {
    /// Key for a product with no size or color dimension.
    #[must_use]
    pub const fn product(product_id: ProductId) -> Self {
        Self {
            product_id,
            size: None,
            color: None,
        }
    }

    /// Create a key from its three parts.
    #[must_use]
    pub fn new(
        product_id: ProductId,
        size: Option<impl Into<String>>,
        color: Option<impl Into<String>>,
    ) -> Self {
        Self {
            product_id,
            size: size.map(Into::into),
            color: color.map(Into::into),
        }
    }

    /// Set the size dimension.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the color dimension.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.product_id)?;
        if let Some(size) = &self.size {
            write!(f, " size {size}")?;
        }
        if let Some(color) = &self.color {
            write!(f, " color {color}")?;
        }
        Ok(())
    }
}
