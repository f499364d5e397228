//! Cart lines and the input used to add them.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, VariantKey};

/// One distinct product variant held in the cart.
///
/// The serialized form is the flat record stored under the `cart` key:
/// `id`, `title`, `price`, `quantity`, `stock`, `sku`, `images` and the
/// optional `size` and `color`.
///
/// Fields are private: a line's quantity only changes through
/// [`Cart::apply`](super::Cart::apply), which keeps it within
/// `1..=stock_limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id")]
    product_id: ProductId,
    title: String,
    #[serde(rename = "price")]
    unit_price: Price,
    pub(super) quantity: u32,
    #[serde(rename = "stock")]
    stock_limit: u32,
    #[serde(default)]
    sku: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl LineItem {
    pub(super) fn from_input(input: AddItem, quantity: u32) -> Self {
        Self {
            product_id: input.product_id,
            title: input.title,
            unit_price: input.unit_price,
            quantity,
            stock_limit: input.stock_limit,
            sku: input.sku,
            images: input.images,
            size: input.size,
            color: input.color,
        }
    }

    /// Variant identity of this line.
    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey {
            product_id: self.product_id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Stock snapshot taken when the line was first added.
    #[must_use]
    pub const fn stock_limit(&self) -> u32 {
        self.stock_limit
    }

    #[must_use]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// Whether the quantity has reached the stock snapshot.
    #[must_use]
    pub const fn at_stock_limit(&self) -> bool {
        self.quantity >= self.stock_limit
    }
}

/// Everything needed to add a variant to the cart.
///
/// Every field is explicit; `size`, `color` and `quantity` start out as
/// "none", "none" and `1` and are set with the `with_*` methods.
///
/// ```
/// use core::num::NonZeroU32;
/// use garments_core::{AddItem, Price, ProductId};
///
/// let input = AddItem::new(ProductId::new(1), "Premium Cotton Shirt", Price::from_cents(2499), 12)
///     .with_size("M")
///     .with_quantity(NonZeroU32::new(2).unwrap());
/// assert_eq!(input.quantity.get(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Price,
    /// Maximum sellable quantity according to the catalog.
    pub stock_limit: u32,
    pub sku: String,
    pub images: Vec<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Requested quantity.
    pub quantity: NonZeroU32,
}

impl AddItem {
    /// Create an input for a single unit of a product with no size or color.
    #[must_use]
    pub fn new(
        product_id: ProductId,
        title: impl Into<String>,
        unit_price: Price,
        stock_limit: u32,
    ) -> Self {
        Self {
            product_id,
            title: title.into(),
            unit_price,
            stock_limit,
            sku: String::new(),
            images: Vec::new(),
            size: None,
            color: None,
            quantity: NonZeroU32::MIN,
        }
    }

    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    #[must_use]
    pub fn with_images(mut self, images: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: NonZeroU32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Variant identity this input resolves to.
    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey {
            product_id: self.product_id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}
