//! Entitlement entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's purchased instance of a package.
///
/// Exactly one entitlement exists per verified payment; `payment_reference`
/// is the idempotency key. Count-based entitlements track
/// `remaining_classes` against the original `total_classes` allotment;
/// time-based entitlements carry a fixed `expires_at` and are unlimited-use
/// within the window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entitlement {
    /// Unique entitlement identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// The package this was minted from.
    pub package_id: Uuid,
    /// The company the package belongs to.
    pub company_id: Uuid,
    /// Provider payment reference, the idempotency key. Unique.
    pub payment_reference: String,
    /// Remaining usable classes (count-based only; never negative).
    pub remaining_classes: Option<i32>,
    /// Original class allotment (count-based only; restore ceiling).
    pub total_classes: Option<i32>,
    /// Validity deadline (time-based only; fixed at creation).
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the entitlement is currently usable.
    pub is_active: bool,
    /// When the entitlement was purchased.
    pub purchased_at: DateTime<Utc>,
}

impl Entitlement {
    /// Whether a time-based entitlement's window has passed at `now`.
    ///
    /// Count-based entitlements never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now,
            None => false,
        }
    }

    /// Whether the entitlement can pay for a booking at `now`.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active || self.is_expired(now) {
            return false;
        }
        match self.remaining_classes {
            Some(remaining) => remaining > 0,
            None => true,
        }
    }
}

/// Data required to mint a new entitlement from a verified payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntitlement {
    /// Owning user.
    pub user_id: Uuid,
    /// Source package.
    pub package_id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Provider payment reference (idempotency key).
    pub payment_reference: String,
    /// Initial remaining classes (count-based).
    pub remaining_classes: Option<i32>,
    /// Original allotment (count-based).
    pub total_classes: Option<i32>,
    /// Validity deadline (time-based).
    pub expires_at: Option<DateTime<Utc>>,
}
