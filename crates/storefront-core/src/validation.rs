//! # Validation Module
//!
//! Checks a catalog payload before it is loaded into the cart state.
//!
//! ## Where Validation Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogSource::fetch()                                                 │
//! │       │  Vec<Product>                                                   │
//! │       ▼                                                                 │
//! │  validate_catalog() ← THIS MODULE                                      │
//! │       │                                                                 │
//! │       ├── bad entry  → report_catalog_error → status = Failed          │
//! │       │                                                                 │
//! │       └── OK         → load_catalog         → status = Ready           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product names are the natural key of the catalog and of cart lines, so a
//! duplicate name would silently merge two products in the cart. It is
//! rejected here instead.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_CATEGORY_LEN: usize = 100;

/// Validates a product name.
///
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Cow's Milk 500ml").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category label.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if category.len() > MAX_CATEGORY_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a single product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_category(&product.category)?;
    validate_price(product.price)
}

/// Validates every product and checks names are unique across the catalog.
pub fn validate_catalog(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        validate_product(product)?;

        if !seen.insert(product.name.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "name".to_string(),
                value: product.name.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str, cents: i64) -> Product {
        Product::new(name, category, Money::from_cents(cents))
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Cow's Paneer 1kg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Milks").is_ok());
        assert_eq!(
            validate_category(" "),
            Err(ValidationError::Required {
                field: "category".to_string()
            })
        );
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(5000)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_catalog_rejects_duplicate_names() {
        let products = vec![
            product("Cow's Milk 500ml", "Milks", 5000),
            product("Cow's Milk 500ml", "Milks", 5500),
        ];
        assert!(matches!(
            validate_catalog(&products),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_catalog_ok() {
        let products = vec![
            product("Cow's Milk 500ml", "Milks", 5000),
            product("Cow's milk 1ltr", "Milks", 10000),
        ];
        assert!(validate_catalog(&products).is_ok());
        assert!(validate_catalog(&[]).is_ok());
    }
}
