//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOP_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;
use shopfinity_core::{Money, ShippingPolicy, FLAT_SHIPPING_FEE, FREE_SHIPPING_OVER};
use tracing::warn;

/// Value of `SHOP_DATA_PATH` that selects in-memory storage.
pub const MEMORY_STORAGE: &str = ":memory:";

/// Where session data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "path")]
pub enum DataLocation {
    /// Nothing persists past the process.
    Memory,
    /// Single JSON document.
    File(PathBuf),
}

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Session storage location.
    pub data: DataLocation,

    /// Catalog JSON file. `None` serves the built-in demo catalog.
    pub catalog_path: Option<PathBuf>,

    /// Subtotals strictly above this ship free.
    pub free_shipping_over: Money,

    /// Flat fee at or below the threshold.
    pub shipping_fee: Money,

    /// Currency symbol for display.
    pub currency_symbol: String,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Data: platform data dir, `storage.json`
    /// - Catalog: demo catalog
    /// - Shipping: 10.00, free over 100.00
    /// - Currency: `$`
    fn default() -> Self {
        AppConfig {
            data: default_data_location(),
            catalog_path: None,
            free_shipping_over: FREE_SHIPPING_OVER,
            shipping_fee: FLAT_SHIPPING_FEE,
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOP_DATA_PATH`: storage file, or `:memory:`
    /// - `SHOP_CATALOG_PATH`: catalog JSON file
    /// - `SHOP_FREE_SHIPPING_OVER`: e.g. `"100.00"`
    /// - `SHOP_SHIPPING_FEE`: e.g. `"10.00"`
    /// - `SHOP_CURRENCY_SYMBOL`: e.g. `"€"`
    ///
    /// Unparsable amounts keep the default and log a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("SHOP_DATA_PATH") {
            config.data = if path.trim() == MEMORY_STORAGE {
                DataLocation::Memory
            } else {
                DataLocation::File(PathBuf::from(path))
            };
        }

        if let Some(path) = lookup("SHOP_CATALOG_PATH") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(amount) = lookup("SHOP_FREE_SHIPPING_OVER") {
            config.free_shipping_over =
                parse_amount("SHOP_FREE_SHIPPING_OVER", &amount, config.free_shipping_over);
        }

        if let Some(amount) = lookup("SHOP_SHIPPING_FEE") {
            config.shipping_fee = parse_amount("SHOP_SHIPPING_FEE", &amount, config.shipping_fee);
        }

        if let Some(symbol) = lookup("SHOP_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Shipping rule for checkout and cart previews.
    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(self.free_shipping_over, self.shipping_fee)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use shopfinity_core::Money;
    /// use shopfinity_storefront::state::AppConfig;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

fn parse_amount(name: &str, raw: &str, default: Money) -> Money {
    match Money::parse(raw) {
        Ok(amount) => amount,
        Err(err) => {
            warn!(variable = name, value = raw, error = %err, "Invalid amount, using default");
            default
        }
    }
}

/// Platform data directory, `storage.json`.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.shopfinity.storefront/storage.json`
/// - **Windows**: `%APPDATA%\shopfinity\storefront\data\storage.json`
/// - **Linux**: `~/.local/share/storefront/storage.json`
///
/// Falls back to `./storage.json` when no home directory is known.
fn default_data_location() -> DataLocation {
    let path = ProjectDirs::from("com", "shopfinity", "storefront")
        .map(|dirs| dirs.data_dir().join("storage.json"))
        .unwrap_or_else(|| PathBuf::from("storage.json"));
    DataLocation::File(path)
}
