//! # storefront-core: Pure Cart & Catalog Logic
//!
//! This crate holds the storefront's state machine as plain data and pure
//! functions. It has no I/O, no timers and no shared ownership; those live in
//! `storefront-store`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View collaborators (browser)                    │   │
//! │  │    Category list ──► Product detail ──► Basket drawer           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ calls / StoreEvent feed                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  storefront-store (CartStore)                   │   │
//! │  │    shared handle, deferred removal, catalog sources, config     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  slugs    │  │   │
//! │  │   │ CartLine  │  │  totals   │  │ invariants│  │ categories│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO GLOBALS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, CatalogStatus, ...)
//! - [`money`] - Integer money, so totals never drift
//! - [`cart`] - The cart state machine and its derived queries
//! - [`catalog`] - Category and slug lookups over the catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog payload validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Product};
//!
//! let milk = Product::new("Cow's Milk 500ml", "Milks", Money::from_cents(5000));
//!
//! let mut cart = Cart::new();
//! cart.add_to_cart(&milk).unwrap();
//! cart.add_to_cart(&milk).unwrap();
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.cart_count(), 2);
//! assert_eq!(cart.cart_total().to_string(), "100.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, QuantityChange};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
