//! # Storefront Configuration
//!
//! Configuration management for the storefront client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FASTFOOD_API_URL=http://localhost:5000                             │
//! │     FASTFOOD_PAYMENT_KEY=pk_test_...                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.fastfood.storefront/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"
//!
//! [payment]
//! publishable_key = "pk_test_votrecle"
//! api_base = "https://api.stripe.com"
//! price_id = "prix_example"
//! success_url = "/confirmation"
//! cancel_url = "/annulation"
//!
//! [storage]
//! token_file = "/tmp/storefront-storage.json"
//!
//! [backend]
//! port = 5000
//! database_url = "mongodb://localhost/fastfood"
//! token_expiration = "24h"
//! ```

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::checkout::CheckoutMode;
use crate::error::{ClientError, ClientResult};
use fastfood_core::CURRENCY_SYMBOL;

// =============================================================================
// API Settings
// =============================================================================

/// Where the storefront backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `/api/produits` and `/api/connexion` are joined onto it.
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_api_url(),
        }
    }
}

// =============================================================================
// Payment Settings
// =============================================================================

/// Hosted checkout parameters.
///
/// Every checkout uses the same single line item; nothing here is derived
/// from the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// Key handed to the payment provider when the client is loaded.
    ///
    /// Shown as `[REDACTED]` whenever the configuration is rendered.
    #[serde(
        default = "default_publishable_key",
        serialize_with = "serialize_redacted",
        deserialize_with = "deserialize_secret"
    )]
    pub publishable_key: SecretString,

    /// Payment provider API root.
    #[serde(default = "default_payment_api")]
    pub api_base: String,

    /// Provider-side price identifier of the single line item.
    #[serde(default = "default_price_id")]
    pub price_id: String,

    /// `payment` or `subscription`; anything else fails to load.
    #[serde(default = "default_checkout_mode")]
    pub mode: CheckoutMode,

    #[serde(default = "default_success_url")]
    pub success_url: String,

    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
}

fn default_publishable_key() -> SecretString {
    SecretString::from("pk_test_votrecle")
}

fn default_payment_api() -> String {
    "https://api.stripe.com".to_string()
}

fn default_price_id() -> String {
    "prix_example".to_string()
}

fn default_checkout_mode() -> CheckoutMode {
    CheckoutMode::Payment
}

fn default_success_url() -> String {
    "/confirmation".to_string()
}

fn default_cancel_url() -> String {
    "/annulation".to_string()
}

fn serialize_redacted<S>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("[REDACTED]")
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            publishable_key: default_publishable_key(),
            api_base: default_payment_api(),
            price_id: default_price_id(),
            mode: default_checkout_mode(),
            success_url: default_success_url(),
            cancel_url: default_cancel_url(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Token file. Defaults to `storage.json` in the platform data directory.
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

// =============================================================================
// Backend Settings
// =============================================================================

/// Server-side constants shipped with the client.
///
/// Loaded and displayed, never used to open a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_port")]
    pub port: u16,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_token_expiration")]
    pub token_expiration: String,
}

fn default_backend_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "mongodb://localhost/fastfood".to_string()
}

fn default_token_expiration() -> String {
    "24h".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            port: default_backend_port(),
            database_url: default_database_url(),
            token_expiration: default_token_expiration(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub payment: PaymentSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(ClientError::InvalidConfig("api.base_url must not be empty".into()));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                base
            )));
        }
        if !self.payment.api_base.starts_with("http://")
            && !self.payment.api_base.starts_with("https://")
        {
            return Err(ClientError::InvalidUrl(format!(
                "Payment API URL must start with http:// or https://, got: {}",
                self.payment.api_base
            )));
        }
        if self.payment.price_id.trim().is_empty() {
            return Err(ClientError::InvalidConfig("payment.price_id must not be empty".into()));
        }
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FASTFOOD_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(key) = std::env::var("FASTFOOD_PAYMENT_KEY") {
            debug!("Overriding payment key from environment");
            self.payment.publishable_key = SecretString::from(key);
        }

        if let Ok(url) = std::env::var("FASTFOOD_PAYMENT_API") {
            self.payment.api_base = url;
        }

        if let Ok(price) = std::env::var("FASTFOOD_PRICE_ID") {
            self.payment.price_id = price;
        }

        if let Ok(path) = std::env::var("FASTFOOD_TOKEN_FILE") {
            self.storage.token_file = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "fastfood", "storefront")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolves the token file, falling back to the platform data directory.
    pub fn token_file(&self) -> ClientResult<PathBuf> {
        if let Some(path) = &self.storage.token_file {
            return Ok(path.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("storage.json"))
            .ok_or_else(|| ClientError::InvalidConfig("Could not determine app data directory".into()))
    }

    pub fn publishable_key(&self) -> &str {
        self.payment.publishable_key.expose_secret()
    }

    pub fn currency_symbol(&self) -> &str {
        &self.display.currency_symbol
    }
}
