//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_REMOVAL_DELAY_MS=700                                    │
//! │     STOREFRONT_CATALOG_PATH=./catalog.json                             │
//! │     STOREFRONT_CURRENCY_SYMBOL=₹                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.demo/... (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     700 ms removal window, built-in catalog, "$"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [cart]
//! removal_delay_ms = 700
//! event_capacity = 64
//!
//! [catalog]
//! path = "catalog.json"   # omit for the built-in catalog
//!
//! [display]
//! currency_symbol = "$"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_core::Money;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Default window during which a removed line renders as pending.
pub const DEFAULT_REMOVAL_DELAY_MS: u64 = 700;

/// Upper bound on the removal window; anything longer is a typo.
const MAX_REMOVAL_DELAY_MS: u64 = 60_000;

// =============================================================================
// Sections
// =============================================================================

/// Cart behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// How long a line stays in the "removing" state before it disappears.
    #[serde(default = "default_removal_delay_ms")]
    pub removal_delay_ms: u64,

    /// Buffered events per subscriber before slow subscribers start lagging.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_removal_delay_ms() -> u64 {
    DEFAULT_REMOVAL_DELAY_MS
}

fn default_event_capacity() -> usize {
    64
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            removal_delay_ms: default_removal_delay_ms(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl CartSettings {
    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }
}

/// Where the catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON file holding the product list. `None` selects the built-in
    /// catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Display helpers for view collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StoreError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.cart.event_capacity == 0 {
            return Err(StoreError::InvalidConfig(
                "event_capacity must be greater than 0".into(),
            ));
        }

        if self.cart.removal_delay_ms > MAX_REMOVAL_DELAY_MS {
            return Err(StoreError::InvalidConfig(format!(
                "removal_delay_ms must be at most {}, got {}",
                MAX_REMOVAL_DELAY_MS, self.cart.removal_delay_ms
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `STOREFRONT_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(delay) = lookup("STOREFRONT_REMOVAL_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding removal delay from environment");
                    self.cart.removal_delay_ms = ms;
                }
                Err(_) => warn!(value = %delay, "Ignoring non-numeric STOREFRONT_REMOVAL_DELAY_MS"),
            }
        }

        if let Some(path) = lookup("STOREFRONT_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "demo")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ```rust
    /// use storefront_core::Money;
    /// use storefront_store::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(5000)), "$50.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!(
                "-{}{}",
                self.display.currency_symbol,
                Money::from_cents(-amount.cents())
            )
        } else {
            format!("{}{}", self.display.currency_symbol, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.cart.removal_delay_ms, 700);
        assert_eq!(config.cart.removal_delay(), Duration::from_millis(700));
        assert_eq!(config.catalog.path, None);
        assert_eq!(config.display.currency_symbol, "$");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();

        config.cart.event_capacity = 0;
        assert!(config.validate().is_err());

        config.cart.event_capacity = 16;
        config.cart.removal_delay_ms = 120_000;
        assert!(config.validate().is_err());

        config.cart.removal_delay_ms = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: StoreConfig = toml::from_str("[cart]\nremoval_delay_ms = 250\n").unwrap();
        assert_eq!(config.cart.removal_delay_ms, 250);
        assert_eq!(config.cart.event_capacity, 64);
        assert_eq!(config.display.currency_symbol, "$");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STOREFRONT_REMOVAL_DELAY_MS", "50"),
            ("STOREFRONT_CATALOG_PATH", "/tmp/catalog.json"),
            ("STOREFRONT_CURRENCY_SYMBOL", "₹"),
        ]
        .into_iter()
        .collect();

        let mut config = StoreConfig::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.cart.removal_delay_ms, 50);
        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.format_currency(Money::from_cents(95000)), "₹950.00");
    }

    #[test]
    fn test_bad_numeric_override_is_ignored() {
        let mut config = StoreConfig::default();
        config.apply_overrides(|k| (k == "STOREFRONT_REMOVAL_DELAY_MS").then(|| "soon".to_string()));
        assert_eq!(config.cart.removal_delay_ms, 700);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storefront.toml");

        let mut config = StoreConfig::default();
        config.cart.removal_delay_ms = 300;
        config.save(Some(path.clone())).unwrap();

        let loaded = StoreConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.cart.removal_delay_ms, 300);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[cart\nremoval_delay_ms = ").unwrap();

        let err = StoreConfig::load(Some(path.clone())).unwrap_err();
        assert!(err.is_config_error());
        assert_eq!(StoreConfig::load_or_default(Some(path)).cart.removal_delay_ms, 700);
    }

    #[test]
    fn test_format_currency_negative() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(-550)), "-$5.50");
    }
}
