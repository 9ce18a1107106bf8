//! # Configuration
//!
//! Storefront settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_catalog::CatalogSource;
use storefront_core::validation::validate_range;
use storefront_core::{ValidationError, MAX_ITEM_QUANTITY, MIN_ITEM_QUANTITY};
use tracing::warn;

/// Most decimal places an amount may be rendered with.
pub const MAX_CURRENCY_DECIMALS: u8 = 6;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Path of the JSON catalog.
    pub catalog_path: PathBuf,

    /// Upper bound on the catalog read.
    pub catalog_timeout: Duration,

    /// Currency code or symbol shown after amounts.
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    pub currency_decimals: u8,

    /// Upper bound of every quantity counter in the view.
    pub max_quantity: i64,
}

impl Default for StorefrontConfig {
    /// ## Default Values
    /// - Catalog: `./data/products.json`, 5 s timeout
    /// - Currency: BYN, 2 decimals
    /// - Quantity: 1..=999
    fn default() -> Self {
        StorefrontConfig {
            catalog_path: PathBuf::from(storefront_catalog::loader::DEFAULT_CATALOG_PATH),
            catalog_timeout: storefront_catalog::loader::DEFAULT_TIMEOUT,
            currency_symbol: "BYN".to_string(),
            currency_decimals: 2,
            max_quantity: MAX_ITEM_QUANTITY,
        }
    }
}

impl StorefrontConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_CATALOG_PATH`: catalog file
    /// - `STOREFRONT_CATALOG_TIMEOUT_MS`: read timeout in milliseconds
    /// - `STOREFRONT_CURRENCY_SYMBOL`: e.g. "BYN", "EUR"
    /// - `STOREFRONT_CURRENCY_DECIMALS`: 0-6
    /// - `STOREFRONT_MAX_QUANTITY`: counter upper bound (>= 1)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StorefrontConfig::from_env`] with a custom variable source.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StorefrontConfig::default();

        if let Some(path) = lookup("STOREFRONT_CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("STOREFRONT_CATALOG_TIMEOUT_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.catalog_timeout = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "ignoring STOREFRONT_CATALOG_TIMEOUT_MS"),
            }
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("STOREFRONT_CURRENCY_DECIMALS") {
            match raw.trim().parse::<u8>() {
                Ok(decimals) if decimals <= MAX_CURRENCY_DECIMALS => {
                    config.currency_decimals = decimals
                }
                _ => warn!(value = %raw, "ignoring STOREFRONT_CURRENCY_DECIMALS"),
            }
        }

        if let Some(raw) = lookup("STOREFRONT_MAX_QUANTITY") {
            match raw.trim().parse::<i64>() {
                Ok(max) if max >= MIN_ITEM_QUANTITY => config.max_quantity = max,
                _ => warn!(value = %raw, "ignoring STOREFRONT_MAX_QUANTITY"),
            }
        }

        config
    }

    /// Checks values that may have been set directly rather than via
    /// [`StorefrontConfig::from_lookup`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_range(MIN_ITEM_QUANTITY, self.max_quantity)?;

        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ValidationError::OutOfRange {
                field: "currency_decimals".to_string(),
                min: 0,
                max: i64::from(MAX_CURRENCY_DECIMALS),
            });
        }

        Ok(())
    }

    /// Catalog location and timeout for the loader.
    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::new(&self.catalog_path).timeout(self.catalog_timeout)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// Decimals above [`MAX_CURRENCY_DECIMALS`] are rendered with the cap.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_lib::config::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(123456), "1234.56 BYN");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let decimals = self.currency_decimals.min(MAX_CURRENCY_DECIMALS);
        let divisor = 10_i64.pow(u32::from(decimals));
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{} {}",
            if cents < 0 { "-" } else { "" },
            if decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = usize::from(decimals)
                )
            } else {
                whole.abs().to_string()
            },
            self.currency_symbol
        )
    }
}
