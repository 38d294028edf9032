//! Payment provider trait for checkout session verification.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A completed (or pending) checkout session as reported by the provider.
///
/// Field names follow the Stripe checkout session object; only the fields
/// the reconciliation flow needs are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider-side session identifier.
    pub id: String,
    /// Payment status, `"paid"` when the charge settled.
    pub payment_status: String,
    /// The underlying payment intent, used as the idempotency key.
    pub payment_intent: Option<String>,
    /// Metadata attached at session creation: `package_id`, `user_id`, `company_id`.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// Whether the provider reports this session as settled.
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }

    /// Look up a metadata value by key.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Trait for payment providers that can look up checkout sessions.
///
/// The production implementation talks to the Stripe API; tests use an
/// in-memory mock.
#[async_trait]
pub trait CheckoutProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Retrieve a checkout session by its provider-side identifier.
    ///
    /// Returns `InvalidPayment` when the session does not exist and
    /// `ExternalService`/`Transient` on provider failures.
    async fn fetch_checkout_session(&self, session_id: &str) -> AppResult<CheckoutSession>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_paid() {
        let session = CheckoutSession {
            id: "cs_test_123".to_string(),
            payment_status: "paid".to_string(),
            payment_intent: Some("pi_123".to_string()),
            metadata: HashMap::new(),
        };
        assert!(session.is_paid());

        let unpaid = CheckoutSession {
            payment_status: "unpaid".to_string(),
            ..session
        };
        assert!(!unpaid.is_paid());
    }

    #[test]
    fn test_metadata_lookup() {
        let mut metadata = HashMap::new();
        metadata.insert("package_id".to_string(), "abc".to_string());
        let session = CheckoutSession {
            id: "cs_test_123".to_string(),
            payment_status: "paid".to_string(),
            payment_intent: None,
            metadata,
        };
        assert_eq!(session.metadata_value("package_id"), Some("abc"));
        assert_eq!(session.metadata_value("user_id"), None);
    }
}
