//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MBARETE_WHATSAPP_PHONE` - Destination WhatsApp number for orders
//!   (default: 0986550235)
//! - `MBARETE_FREE_SHIPPING_MIN` - Subtotal at which shipping becomes free,
//!   in guaraníes (default: 300000)

use thiserror::Error;

use crate::shipping::FREE_SHIPPING_MIN;

/// Default order destination when `MBARETE_WHATSAPP_PHONE` is unset.
pub const DEFAULT_WHATSAPP_PHONE: &str = "0986550235";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Runtime configuration for the order flow.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// WhatsApp number orders are sent to (normalized at link time).
    pub whatsapp_phone: String,
    /// Free-shipping threshold in guaraníes.
    pub free_shipping_min: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            whatsapp_phone: DEFAULT_WHATSAPP_PHONE.to_owned(),
            free_shipping_min: FREE_SHIPPING_MIN,
        }
    }
}

impl StoreConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when `MBARETE_FREE_SHIPPING_MIN`
    /// is set but not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(phone) = std::env::var("MBARETE_WHATSAPP_PHONE") {
            config.whatsapp_phone = phone;
        }
        if let Ok(raw) = std::env::var("MBARETE_FREE_SHIPPING_MIN") {
            config.free_shipping_min = raw
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar("MBARETE_FREE_SHIPPING_MIN", raw))?;
        }
        Ok(config)
    }
}
