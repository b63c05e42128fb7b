//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Cart contract violations, catalog lifecycle    │
//! │  └── ValidationError  - Malformed catalog payloads                     │
//! │                                                                         │
//! │  storefront-store errors (separate crate)                              │
//! │  └── StoreError       - Catalog sources, config, scheduling            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → view collaborator    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (name, index, id)
//! 3. A bad index or name is rejected, never allowed to corrupt the cart

use thiserror::Error;

use crate::types::{CatalogStatus, LineId};

// =============================================================================
// Core Error
// =============================================================================

/// Core cart and catalog errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No cart line exists for the given product name.
    ///
    /// ## When This Occurs
    /// - `increment_existing_line` called for a product never added
    /// - The line was removed between lookup and mutation
    #[error("No cart line for product: {0}")]
    LineNotFound(String),

    /// Positional index does not address a cart line.
    ///
    /// Indices are re-resolved by callers after every removal; a stale
    /// index lands here instead of touching the wrong line.
    #[error("Cart index {index} out of range (cart has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A line for this product already exists.
    ///
    /// Raised by `add_new_line` so that uniqueness holds even when callers
    /// skip the `add_to_cart` composition.
    #[error("Product already in cart: {0}")]
    DuplicateLine(String),

    /// A stable line id no longer addresses a line.
    #[error("Cart line {0} no longer exists")]
    UnknownLine(LineId),

    /// The catalog has already reached a terminal status.
    #[error("Catalog is already {status}, cannot transition again")]
    CatalogAlreadySettled { status: CatalogStatus },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for errors caused by a caller addressing the cart
    /// incorrectly (bad index, unknown name or id, duplicate add).
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            CoreError::LineNotFound(_)
                | CoreError::IndexOutOfRange { .. }
                | CoreError::DuplicateLine(_)
                | CoreError::UnknownLine(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog payload validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Duplicate value (e.g., two products with the same name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
