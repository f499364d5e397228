//! Catalog listing.

use garments_storefront::AppState;
use tracing::info;

/// Log every catalog product with its variant options.
pub fn list(state: &AppState) {
    for product in state.catalog().all() {
        let availability = if product.in_stock() {
            format!("{} in stock", product.stock)
        } else {
            "out of stock".to_owned()
        };
        info!(
            "#{} {} {} ({availability}) [{}, rated {:.1}]",
            product.id, product.title, product.price, product.category, product.rating
        );
        if !product.sizes.is_empty() {
            info!("    sizes: {}", product.sizes.join(", "));
        }
        if !product.colors.is_empty() {
            info!("    colors: {}", product.colors.join(", "));
        }
    }
}
