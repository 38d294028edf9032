//! Hosted-auth token verification configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying identity tokens issued by the hosted auth provider.
///
/// FitBook never handles credentials itself; it only verifies the HMAC
/// signature on tokens the provider issues and trusts the claims inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for verifying provider-issued JWTs (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Clock-skew leeway applied to `exp` validation, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    5
}
