//! JWT claims embedded in provider-issued identity tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fitbook_entity::account::AccountRole;

/// Claims payload of an identity token.
///
/// The role and company binding are resolved by the auth provider at token
/// issuance; FitBook trusts them for the token's lifetime and never
/// re-derives them per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Account role at issuance time.
    pub role: AccountRole,
    /// The company this user owns, for `company` role tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Uuid>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
