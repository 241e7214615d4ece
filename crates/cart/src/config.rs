//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_STORAGE_DIR` - Directory for file-backed storage (default: `.cart`)
//! - `CART_STORAGE_KEY` - Key of the durable cart slot (default: `@app:cart`)
//! - `CART_CURRENCY` - ISO 4217 code used to format totals (default: `USD`)

use std::path::PathBuf;

use floating_cart_core::CurrencyCode;
use thiserror::Error;

use crate::storage::FileStorage;

/// Key of the durable slot holding the cart snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "@app:cart";

const DEFAULT_STORAGE_DIR: &str = ".cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory used by [`FileStorage`]
    pub storage_dir: PathBuf,
    /// Key of the durable cart slot
    pub storage_key: String,
    /// Currency used when formatting totals
    pub currency: CurrencyCode,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let storage_dir = get("CART_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);
        let storage_key =
            get("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        let currency = match get("CART_CURRENCY") {
            Some(code) => code
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("CART_CURRENCY".to_string(), e))?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            storage_dir,
            storage_key,
            currency,
        })
    }

    /// File storage rooted at [`Self::storage_dir`].
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }
}
