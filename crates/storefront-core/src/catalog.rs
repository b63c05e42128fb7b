//! # Catalog Queries
//!
//! Pure lookups over a loaded product list. The views route by opaque
//! identifiers: a lower-cased category label for listings and a slug for
//! product detail pages. These functions resolve those identifiers against
//! the catalog.
//!
//! ```text
//!  "Cow's Milk 500ml"  ──product_slug──►  "cow's-milk-500ml"
//!  "Milks"             ──category key──►  "milks"
//! ```

use std::collections::BTreeSet;

use crate::types::Product;

/// Builds the URL slug for a product name: every whitespace run becomes a
/// single `-` and the result is lower-cased. Leading and trailing runs are
/// kept as `-` too.
///
/// ```rust
/// use storefront_core::catalog::product_slug;
///
/// assert_eq!(product_slug("Cow's Milk 500ml"), "cow's-milk-500ml");
/// ```
pub fn product_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_run {
                slug.push('-');
            }
            in_run = true;
        } else {
            slug.push(c);
            in_run = false;
        }
    }
    slug.to_lowercase()
}

/// Distinct lower-cased category labels present in the catalog.
pub fn category_names(products: &[Product]) -> BTreeSet<String> {
    products.iter().map(Product::category_key).collect()
}

/// Products whose lower-cased category equals `category` (compared
/// case-insensitively), in catalog order.
pub fn products_in_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    let key = category.to_lowercase();
    products
        .iter()
        .filter(|p| p.category_key() == key)
        .collect()
}

/// The product whose slug matches `slug`, ignoring case.
pub fn product_by_slug<'a>(products: &'a [Product], slug: &str) -> Option<&'a Product> {
    let wanted = slug.to_lowercase();
    products.iter().find(|p| p.slug() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn dairy() -> Vec<Product> {
        vec![
            Product::new("Cow's Milk 500ml", "Milks", Money::from_cents(5000)),
            Product::new("Cow's milk 1ltr", "Milks", Money::from_cents(10000)),
            Product::new("Cow's yogurt 500ml", "Yogurt", Money::from_cents(6000)),
            Product::new("Cow's Ghee 500gm", "Ghee", Money::from_cents(90000)),
            Product::new("Cow's Paneer 1kg", "Paneer", Money::from_cents(95000)),
        ]
    }

    #[test]
    fn test_product_slug() {
        assert_eq!(product_slug("Cow's Paneer 1kg"), "cow's-paneer-1kg");
        assert_eq!(product_slug("Double   space"), "double-space");
        assert_eq!(product_slug("\tTabbed\nName"), "-tabbed-name");
        assert_eq!(product_slug(""), "");
    }

    #[test]
    fn test_product_slug_keeps_edge_whitespace() {
        assert_eq!(product_slug(" Milk "), "-milk-");
        assert_eq!(product_slug("  Double   space "), "-double-space-");
        assert_eq!(product_slug("   "), "-");
    }

    #[test]
    fn test_category_names_distinct_and_lowercase() {
        let names = category_names(&dairy());
        let expected: BTreeSet<String> = ["milks", "yogurt", "ghee", "paneer"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
        assert!(category_names(&[]).is_empty());
    }

    #[test]
    fn test_products_in_category() {
        let products = dairy();
        let milks = products_in_category(&products, "milks");
        assert_eq!(milks.len(), 2);
        assert_eq!(milks[0].name, "Cow's Milk 500ml");
        assert_eq!(products_in_category(&products, "MILKS").len(), 2);
        assert!(products_in_category(&products, "cheese").is_empty());
    }

    #[test]
    fn test_product_by_slug() {
        let products = dairy();
        let found = product_by_slug(&products, "cow's-ghee-500gm").unwrap();
        assert_eq!(found.name, "Cow's Ghee 500gm");

        let milk = product_by_slug(&products, "Cow's-Milk-500ml").unwrap();
        assert_eq!(milk.name, "Cow's Milk 500ml");

        assert!(product_by_slug(&products, "goat-milk").is_none());
    }
}
