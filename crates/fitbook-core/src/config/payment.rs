//! Payment provider configuration.

use serde::{Deserialize, Serialize};

/// Stripe checkout verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key.
    #[serde(default)]
    pub stripe_secret_key: String,
    /// Base URL of the Stripe API (overridable for tests).
    #[serde(default = "default_api_base")]
    pub api_base_url: String,
    /// Request timeout for provider calls, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: String::new(),
            api_base_url: default_api_base(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.stripe.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
