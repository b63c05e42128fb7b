//! # Store Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Cart contract  │  │    Catalog      │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Core(..)       │  │  CatalogSource  │  │  InvalidConfig          │ │
//! │  │  RemovalAlready │  │  Core(Catalog   │  │  ConfigLoadFailed       │ │
//! │  │    Pending      │  │   LoadFailure)  │  │  ConfigSaveFailed       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{CoreError, LineId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Cart / Catalog State
    // =========================================================================
    /// Rejected by the cart state machine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A deferred removal is already scheduled for this line.
    #[error("Removal already pending for cart line {0}")]
    RemovalAlreadyPending(LineId),

    /// The deferred removal task panicked or was aborted.
    #[error("Removal task failed: {0}")]
    TaskFailed(String),

    // =========================================================================
    // Catalog Source
    // =========================================================================
    /// The catalog source could not produce a product list.
    #[error("Catalog source failed: {0}")]
    CatalogSource(String),

    // =========================================================================
    // Configuration
    // =========================================================================
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::CatalogSource(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::CatalogSource(format!("malformed catalog JSON: {}", err))
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::TaskFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl StoreError {
    /// Returns true when the caller addressed the cart incorrectly.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            StoreError::Core(core) => core.is_contract_violation(),
            StoreError::RemovalAlreadyPending(_) => true,
            _ => false,
        }
    }

    /// Returns true for failures that surface as the "unable to load
    /// products" state.
    pub fn is_catalog_error(&self) -> bool {
        matches!(
            self,
            StoreError::CatalogSource(_)
                | StoreError::Core(CoreError::Validation(_))
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_)
                | StoreError::ConfigLoadFailed(_)
                | StoreError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_transparent() {
        let err: StoreError = CoreError::LineNotFound("Cow's Milk 500ml".into()).into();
        assert_eq!(err.to_string(), "No cart line for product: Cow's Milk 500ml");
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_categories() {
        assert!(StoreError::CatalogSource("timeout".into()).is_catalog_error());
        assert!(!StoreError::CatalogSource("timeout".into()).is_contract_violation());
        assert!(StoreError::InvalidConfig("bad".into()).is_config_error());
        assert!(StoreError::RemovalAlreadyPending(LineId::new()).is_contract_violation());
    }

    #[test]
    fn test_catalog_error_covers_validation_only() {
        let invalid: StoreError = CoreError::from(storefront_core::ValidationError::Required {
            field: "name".into(),
        })
        .into();
        assert!(invalid.is_catalog_error());

        let settled: StoreError = CoreError::CatalogAlreadySettled {
            status: storefront_core::CatalogStatus::Ready,
        }
        .into();
        assert!(!settled.is_catalog_error());
    }

    #[test]
    fn test_json_error_is_catalog_error() {
        let err: StoreError = serde_json::from_str::<Vec<u8>>("nope").unwrap_err().into();
        assert!(err.is_catalog_error());
        assert!(err.to_string().contains("malformed catalog JSON"));
    }
}
