//! Static product catalog.
//!
//! Products are a fixed in-memory list. The cart trusts whatever the catalog
//! says at the moment a variant is added and never consults it again.

use core::num::NonZeroU32;

use garments_core::{AddItem, Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a product variant cannot be put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{title} is out of stock")]
    OutOfStock { title: String },

    #[error("please select a size for {title} ({})", .offered.join(", "))]
    SizeRequired { title: String, offered: Vec<String> },

    #[error("please select a color for {title} ({})", .offered.join(", "))]
    ColorRequired { title: String, offered: Vec<String> },

    #[error("{title} does not come in size {size}")]
    UnknownSize { title: String, size: String },

    #[error("{title} does not come in color {color}")]
    UnknownColor { title: String, color: String },
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub stock: u32,
    pub sku: String,
    pub category: String,
    pub rating: f32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Product {
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Build the cart input for one variant of this product.
    ///
    /// A size is required when the product offers sizes and a color when it
    /// offers colors; a chosen value must be one the product offers.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if the product is out of stock or the
    /// size or color choice is missing or not offered.
    pub fn cart_input(
        &self,
        size: Option<&str>,
        color: Option<&str>,
        quantity: NonZeroU32,
    ) -> Result<AddItem, SelectionError> {
        if !self.in_stock() {
            return Err(SelectionError::OutOfStock {
                title: self.title.clone(),
            });
        }
        let size = pick(size, &self.sizes).map_err(|choice| match choice {
            None => SelectionError::SizeRequired {
                title: self.title.clone(),
                offered: self.sizes.clone(),
            },
            Some(size) => SelectionError::UnknownSize {
                title: self.title.clone(),
                size,
            },
        })?;
        let color = pick(color, &self.colors).map_err(|choice| match choice {
            None => SelectionError::ColorRequired {
                title: self.title.clone(),
                offered: self.colors.clone(),
            },
            Some(color) => SelectionError::UnknownColor {
                title: self.title.clone(),
                color,
            },
        })?;

        let mut input = AddItem::new(self.id, self.title.clone(), self.price, self.stock)
            .with_sku(self.sku.clone())
            .with_images(self.images.iter().cloned())
            .with_quantity(quantity);
        input.size = size;
        input.color = color;
        Ok(input)
    }
}

/// Resolve one variant dimension against the offered values.
///
/// `Err(None)` means a value was required but missing; `Err(Some(v))` means
/// `v` is not offered.
fn pick(choice: Option<&str>, offered: &[String]) -> Result<Option<String>, Option<String>> {
    match choice {
        None if offered.is_empty() => Ok(None),
        None => Err(None),
        Some(value) => offered
            .iter()
            .find(|o| o.eq_ignore_ascii_case(value))
            .map(|o| Some(o.clone()))
            .ok_or_else(|| Some(value.to_owned())),
    }
}

/// The product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's built-in product list.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            product(1, "Premium Cotton Shirt", 2499, 12, "SG-SHIRT-001", "men", 4.5)
                .with_sizes(&["S", "M", "L", "XL"])
                .with_colors(&["#000000", "#FFFFFF", "#1E3A8A"]),
            product(2, "Casual Denim Jacket", 4999, 5, "SG-JACKET-002", "men", 4.8)
                .with_sizes(&["M", "L", "XL"])
                .with_colors(&["#1E3A8A", "#000000"]),
            product(3, "Elegant Summer Dress", 3499, 8, "SG-DRESS-003", "women", 4.7)
                .with_sizes(&["S", "M", "L"])
                .with_colors(&["#FF0000", "#FFC0CB"]),
            product(4, "Kids Graphic Tee", 1299, 20, "SG-TEE-004", "kids", 4.3)
                .with_sizes(&["XS", "S", "M"]),
            product(5, "Leather Belt", 1999, 3, "SG-BELT-005", "accessories", 4.1)
                .with_colors(&["#000000", "#8B4513"]),
            product(6, "Canvas Tote Bag", 999, 0, "SG-TOTE-006", "accessories", 4.0),
        ])
    }

    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

fn product(
    id: u32,
    title: &str,
    cents: u64,
    stock: u32,
    sku: &str,
    category: &str,
    rating: f32,
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        price: Price::from_cents(cents),
        stock,
        sku: sku.to_owned(),
        category: category.to_owned(),
        rating,
        images: vec![format!("/images/{sku}-front.png"), format!("/images/{sku}-back.png")],
        sizes: Vec::new(),
        colors: Vec::new(),
    }
}

impl Product {
    fn with_sizes(mut self, sizes: &[&str]) -> Self {
        self.sizes = sizes.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|c| (*c).to_owned()).collect();
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn one() -> NonZeroU32 {
        NonZeroU32::MIN
    }

    fn find(id: u32) -> Product {
        Catalog::builtin().find(ProductId::new(id)).unwrap().clone()
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<_> = catalog.all().iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.all().len());
    }

    #[test]
    fn test_find_missing() {
        assert!(Catalog::builtin().find(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_cart_input_carries_catalog_data() {
        let shirt = find(1);
        let input = shirt.cart_input(Some("m"), Some("#000000"), one()).unwrap();
        assert_eq!(input.product_id, shirt.id);
        assert_eq!(input.unit_price, Price::from_cents(2499));
        assert_eq!(input.stock_limit, 12);
        assert_eq!(input.sku, "SG-SHIRT-001");
        assert_eq!(input.size.as_deref(), Some("M"));
        assert_eq!(input.color.as_deref(), Some("#000000"));
        assert_eq!(input.images.len(), 2);
    }

    #[test]
    fn test_size_required() {
        let err = find(1).cart_input(None, Some("#000000"), one()).unwrap_err();
        assert!(matches!(err, SelectionError::SizeRequired { .. }));
        assert!(err.to_string().contains("S, M, L, XL"));
    }

    #[test]
    fn test_color_required() {
        let err = find(5).cart_input(None, None, one()).unwrap_err();
        assert!(matches!(err, SelectionError::ColorRequired { .. }));
    }

    #[test]
    fn test_unknown_size() {
        let err = find(2).cart_input(Some("XS"), Some("#000000"), one()).unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownSize {
                title: "Casual Denim Jacket".to_owned(),
                size: "XS".to_owned(),
            }
        );
    }

    #[test]
    fn test_size_on_sizeless_product_is_unknown() {
        let err = find(5).cart_input(Some("M"), Some("#000000"), one()).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownSize { .. }));
    }

    #[test]
    fn test_no_dimensions_needed() {
        let input = find(4)
            .cart_input(Some("S"), None, NonZeroU32::new(3).unwrap())
            .unwrap();
        assert_eq!(input.color, None);
        assert_eq!(input.quantity.get(), 3);
    }

    #[test]
    fn test_out_of_stock() {
        let err = find(6).cart_input(None, None, one()).unwrap_err();
        assert!(matches!(err, SelectionError::OutOfStock { .. }));
    }
}
