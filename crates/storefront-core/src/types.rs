//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │  CatalogStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │──►│  id (LineId)    │   │  Loading        │       │
//! │  │  category       │   │  name  (frozen) │   │  Ready          │       │
//! │  │  price          │   │  unit_price     │   │  Failed         │       │
//! │  │  image          │   │  quantity ≥ 1   │   └─────────────────┘       │
//! │  └─────────────────┘   │  is_removing    │                              │
//! │                        └─────────────────┘   ┌─────────────────┐       │
//! │                                              │   Direction     │       │
//! │                                              │  Increase       │       │
//! │                                              │  Decrease       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `Product.name` is the natural key of the catalog; there is no id field.
//! - `CartLine.id` is a synthetic UUID. Positions in the cart shift when
//!   lines are removed, ids never do.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Display name, unique within the catalog.
    pub name: String,

    /// Grouping label ("Milks", "Yogurt", ...).
    pub category: String,

    /// Unit price.
    pub price: Money,

    /// Opaque image reference, display-only.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Creates a product with no image.
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Money) -> Self {
        Product {
            name: name.into(),
            category: category.into(),
            price,
            image: String::new(),
        }
    }

    /// Builder-style image setter.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// The URL slug for this product's detail view.
    pub fn slug(&self) -> String {
        crate::catalog::product_slug(&self.name)
    }

    /// The lower-cased category label used for category routing.
    pub fn category_key(&self) -> String {
        self.category.to_lowercase()
    }
}

// =============================================================================
// Line Identity
// =============================================================================

/// Stable identifier for a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(Uuid);

impl LineId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        LineId(Uuid::new_v4())
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One entry in the cart: a distinct product and its quantity.
///
/// ## Price Freezing
/// `name` and `unit_price` are copied from the product when the line is
/// created. Reloading the catalog with a new price does not reprice lines
/// that are already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    #[ts(as = "String")]
    pub id: LineId,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price at time of adding (frozen).
    pub unit_price: Money,

    /// Always ≥ 1; a line whose quantity would reach 0 is removed instead.
    pub quantity: u32,

    /// True while a deferred removal is pending for this line.
    pub is_removing: bool,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a quantity-1 line snapshotting the product's name and price.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            id: LineId::new(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            is_removing: false,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Catalog Status
// =============================================================================

/// Load status of the product catalog.
///
/// ```text
///            ┌──────► Ready
///  Loading ──┤
///            └──────► Failed
/// ```
/// Both `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

impl CatalogStatus {
    /// Returns true once the catalog has either loaded or failed.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CatalogStatus::Loading)
    }
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogStatus::Loading => write!(f, "loading"),
            CatalogStatus::Ready => write!(f, "ready"),
            CatalogStatus::Failed => write!(f, "failed"),
        }
    }
}

// =============================================================================
// Quantity Direction
// =============================================================================

/// Which way a quantity stepper was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Maps the views' `increase: bool` flag onto a direction.
    pub fn from_increase(increase: bool) -> Self {
        if increase {
            Direction::Increase
        } else {
            Direction::Decrease
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_snapshots_product() {
        let mut product = Product::new("Cow's Milk 500ml", "Milks", Money::from_cents(5000));
        let line = CartLine::from_product(&product);

        product.price = Money::from_cents(9999);

        assert_eq!(line.quantity, 1);
        assert!(!line.is_removing);
        assert_eq!(line.unit_price.cents(), 5000);
        assert_eq!(line.name, "Cow's Milk 500ml");
    }

    #[test]
    fn test_line_total() {
        let product = Product::new("Cow's Ghee 500gm", "Ghee", Money::from_cents(90000));
        let mut line = CartLine::from_product(&product);
        line.quantity = 3;
        assert_eq!(line.line_total().to_string(), "2700.00");
    }

    #[test]
    fn test_line_ids_are_distinct() {
        assert_ne!(LineId::new(), LineId::new());
    }

    #[test]
    fn test_catalog_status_terminal() {
        assert!(!CatalogStatus::Loading.is_terminal());
        assert!(CatalogStatus::Ready.is_terminal());
        assert!(CatalogStatus::Failed.is_terminal());
        assert_eq!(CatalogStatus::default(), CatalogStatus::Loading);
    }

    #[test]
    fn test_product_json_shape() {
        let product =
            Product::new("Cow's yogurt 500ml", "Yogurt", Money::from_cents(6000)).with_image("dahi");
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["name"], "Cow's yogurt 500ml");
        assert_eq!(json["price"], 6000);
        assert_eq!(json["image"], "dahi");

        let parsed: Product =
            serde_json::from_str(r#"{"name":"X","category":"Y","price":100}"#).unwrap();
        assert_eq!(parsed.image, "");
    }

    #[test]
    fn test_direction_from_flag() {
        assert_eq!(Direction::from_increase(true), Direction::Increase);
        assert_eq!(Direction::from_increase(false), Direction::Decrease);
    }
}
