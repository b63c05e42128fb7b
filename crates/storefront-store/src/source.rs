//! # Catalog Sources
//!
//! The catalog is fetched from a collaborator rather than owned by the store.
//! Anything that can produce a product list asynchronously implements
//! [`CatalogSource`].
//!
//! ```text
//!  StaticCatalog ──┐
//!                  ├──► CatalogSource::fetch() ──► CartStore::retrieve_products()
//!  JsonFileCatalog ┘
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};

use storefront_core::{Money, Product};
use tracing::debug;

use crate::config::CatalogSettings;
use crate::error::StoreResult;

/// Produces the product catalog.
pub trait CatalogSource {
    /// Fetches the full product list.
    fn fetch(&self) -> impl Future<Output = StoreResult<Vec<Product>>> + Send;

    /// Short description for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// Static Catalog
// =============================================================================

/// An in-memory product list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        StaticCatalog { products }
    }

    /// The built-in demo catalog: five dairy products over four categories.
    pub fn dairy() -> Self {
        StaticCatalog::new(vec![
            Product::new("Cow's Milk 500ml", "Milks", Money::from_major_minor(50, 0))
                .with_image("milk"),
            Product::new("Cow's milk 1ltr", "Milks", Money::from_major_minor(100, 0))
                .with_image("milk1"),
            Product::new("Cow's yogurt 500ml", "Yogurt", Money::from_major_minor(60, 0))
                .with_image("dahi"),
            Product::new("Cow's Ghee 500gm", "Ghee", Money::from_major_minor(900, 0))
                .with_image("ghee"),
            Product::new("Cow's Paneer 1kg", "Paneer", Money::from_major_minor(950, 0))
                .with_image("paneer"),
        ])
    }
}

impl CatalogSource for StaticCatalog {
    async fn fetch(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("static catalog ({} products)", self.products.len())
    }
}

// =============================================================================
// JSON File Catalog
// =============================================================================

/// Reads a JSON array of products from disk.
///
/// ```json
/// [
///   { "name": "Cow's Milk 500ml", "category": "Milks", "price": 5000, "image": "milk" }
/// ]
/// ```
/// Prices are in cents.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileCatalog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileCatalog {
    async fn fetch(&self) -> StoreResult<Vec<Product>> {
        debug!(path = ?self.path, "Reading catalog file");
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let products: Vec<Product> = serde_json::from_str(&contents)?;
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

// =============================================================================
// Configured Catalog
// =============================================================================

/// The source selected by [`CatalogSettings`].
#[derive(Debug, Clone)]
pub enum ConfiguredCatalog {
    Static(StaticCatalog),
    File(JsonFileCatalog),
}

impl ConfiguredCatalog {
    pub fn from_settings(settings: &CatalogSettings) -> Self {
        match &settings.path {
            Some(path) => ConfiguredCatalog::File(JsonFileCatalog::new(path.clone())),
            None => ConfiguredCatalog::Static(StaticCatalog::dairy()),
        }
    }
}

impl CatalogSource for ConfiguredCatalog {
    async fn fetch(&self) -> StoreResult<Vec<Product>> {
        match self {
            ConfiguredCatalog::Static(source) => source.fetch().await,
            ConfiguredCatalog::File(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            ConfiguredCatalog::Static(source) => source.describe(),
            ConfiguredCatalog::File(source) => source.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dairy_catalog() {
        let products = StaticCatalog::dairy().fetch().await.unwrap();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].name, "Cow's Milk 500ml");
        assert_eq!(products[0].price.to_string(), "50.00");
        assert_eq!(products[4].price.cents(), 95000);
    }

    #[tokio::test]
    async fn test_json_file_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Goat Milk", "category": "Milks", "price": 7550, "image": "goat"},
                {"name": "Butter", "category": "Butter", "price": 0}
            ]"#,
        )
        .unwrap();

        let products = JsonFileCatalog::new(&path).fetch().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price.to_string(), "75.50");
        assert_eq!(products[1].image, "");
    }

    #[tokio::test]
    async fn test_missing_file_is_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileCatalog::new(dir.path().join("absent.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(err.is_catalog_error());
    }

    #[tokio::test]
    async fn test_malformed_file_is_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not a list").unwrap();

        let err = JsonFileCatalog::new(&path).fetch().await.unwrap_err();
        assert!(err.is_catalog_error());
    }

    #[test]
    fn test_configured_catalog_selection() {
        let settings = CatalogSettings::default();
        assert!(matches!(
            ConfiguredCatalog::from_settings(&settings),
            ConfiguredCatalog::Static(_)
        ));

        let settings = CatalogSettings {
            path: Some(PathBuf::from("catalog.json")),
        };
        let source = ConfiguredCatalog::from_settings(&settings);
        assert!(source.describe().contains("catalog.json"));
    }
}
