//! # Text Views
//!
//! Plain-text stand-ins for the storefront views. Each one renders from a
//! [`CartSnapshot`] or the catalog and holds no state of its own.
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  CART                                   3 items  │
//! ├──────────────────────────────────────────────────┤
//! │  Cow's Milk 500ml      x2   $100.00              │
//! │  Cow's Ghee 500gm      x1   $900.00  (removing)  │
//! ├──────────────────────────────────────────────────┤
//! │  TOTAL                      $1000.00             │
//! └──────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use storefront_core::{CatalogStatus, Product};
use storefront_store::{CartSnapshot, StoreConfig};

/// The cart badge in the header.
pub fn render_badge(snapshot: &CartSnapshot) -> String {
    match snapshot.cart_count {
        1 => "1 item".to_string(),
        n => format!("{} items", n),
    }
}

/// The basket page.
pub fn render_basket(snapshot: &CartSnapshot, config: &StoreConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CART ({})", render_badge(snapshot));

    if snapshot.lines.is_empty() {
        let _ = writeln!(out, "  Your cart is empty");
    }

    for line in &snapshot.lines {
        let _ = write!(
            out,
            "  {:<24} x{:<3} {:>10}",
            line.name,
            line.quantity,
            config.format_currency(line.line_total())
        );
        if line.is_removing {
            out.push_str("  (removing)");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "  TOTAL {:>33}", config.format_currency(snapshot.cart_total));
    out
}

/// A category listing page.
pub fn render_category(category: &str, products: &[Product], config: &StoreConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", category);
    for product in products {
        let _ = writeln!(
            out,
            "  {:<24} {:>10}  /product/{}",
            product.name,
            config.format_currency(product.price),
            product.slug()
        );
    }
    out
}

/// The banner shown while the catalog is not ready.
pub fn render_catalog_status(snapshot: &CartSnapshot) -> Option<String> {
    match snapshot.catalog_status {
        CatalogStatus::Ready => None,
        CatalogStatus::Loading => Some("Loading products...".to_string()),
        CatalogStatus::Failed => Some(match &snapshot.last_catalog_error {
            Some(e) => format!("Unable to load products: {}", e),
            None => "Unable to load products".to_string(),
        }),
    }
}
