//! Bot configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CHATSHOP_BOT_NAME` - Display name the bot announces itself with
//!   (default: `chatshop`). Must be non-empty if set.
//! - `CHATSHOP_PRODUCTS` - Catalog seed records, `id,name,price,stock`
//!   separated by `;` (see [`crate::seed`])
//! - `CHATSHOP_COUPONS` - Coupon seed records, `code,amount` separated
//!   by `;`

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to an unusable value.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Bot application configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Display name the bot announces itself with.
    pub bot_name: String,
    /// Catalog seed records, if provided.
    pub products: Option<String>,
    /// Coupon seed records, if provided.
    pub coupons: Option<String>,
}

impl BotConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `CHATSHOP_BOT_NAME` is
    /// set to an empty or whitespace-only value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_name = match std::env::var("CHATSHOP_BOT_NAME") {
            Ok(name) => {
                if name.trim().is_empty() {
                    return Err(ConfigError::InvalidEnvVar(
                        "CHATSHOP_BOT_NAME".to_owned(),
                        "must not be empty".to_owned(),
                    ));
                }
                name
            }
            Err(_) => "chatshop".to_owned(),
        };

        Ok(Self {
            bot_name,
            products: std::env::var("CHATSHOP_PRODUCTS").ok(),
            coupons: std::env::var("CHATSHOP_COUPONS").ok(),
        })
    }
}
