//! # storefront-store: Shared Cart Store
//!
//! This crate wraps the pure [`storefront_core::Cart`] in a handle that views
//! can share, and adds the parts that need a runtime: the timed removal, the
//! catalog fetch, change notifications and configuration.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Store                                 │
//! │                                                                         │
//! │  Views (badge, basket, product pages)                                  │
//! │       │  clone of CartStore          ▲ StoreEvent (broadcast)          │
//! │       ▼                              │                                  │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  CartStore  Arc<Mutex<Cart>>                      │  │
//! │  └───────┬───────────────────────┬───────────────────────┬──────────┘  │
//! │          │                       │                       │              │
//! │          ▼                       ▼                       ▼              │
//! │  ┌────────────────┐  ┌────────────────────┐  ┌────────────────────┐    │
//! │  │ CatalogSource  │  │  PendingRemoval    │  │   StoreConfig      │    │
//! │  │                │  │                    │  │                    │    │
//! │  │ Static payload │  │ Spawned timer +    │  │ TOML file + env    │    │
//! │  │ or JSON file   │  │ CancellationToken  │  │ overrides          │    │
//! │  └────────────────┘  └────────────────────┘  └────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Removal window, event capacity, catalog path, currency
//! - [`error`] - Store error types
//! - [`events`] - Change notifications
//! - [`removal`] - Deferred removal handle and outcome
//! - [`source`] - Catalog sources
//! - [`store`] - The `CartStore` handle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_store::{CartStore, ConfiguredCatalog, StoreConfig};
//!
//! let config = StoreConfig::load_or_default(None);
//! let store = CartStore::from_config(&config);
//!
//! store.retrieve_products(&ConfiguredCatalog::from_settings(&config.catalog)).await?;
//!
//! let milk = store.product_by_slug("cow's-milk-500ml").unwrap();
//! store.add_to_cart(&milk)?;
//! println!("Total: {}", config.format_currency(store.cart_total()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod events;
pub mod removal;
pub mod source;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{CartSettings, CatalogSettings, DisplaySettings, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use events::StoreEvent;
pub use removal::{PendingRemoval, RemovalOutcome};
pub use source::{CatalogSource, ConfiguredCatalog, JsonFileCatalog, StaticCatalog};
pub use store::{CartSnapshot, CartStore};
