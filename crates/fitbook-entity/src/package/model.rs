//! Package entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use fitbook_core::AppResult;
use fitbook_core::error::AppError;

use super::kind::PackageKind;

/// A company-defined purchasable bundle: either a fixed class count or a
/// time-limited access window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    /// Unique package identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Whether the package grants a class count or a time window.
    pub kind: PackageKind,
    /// Number of classes granted (class-count packages only).
    pub class_count: Option<i32>,
    /// Validity window in days (time-based packages only).
    pub duration_days: Option<i32>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Whether the package is currently purchasable.
    pub is_active: bool,
    /// When the package was created.
    pub created_at: DateTime<Utc>,
    /// When the package was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Validate that the kind-specific field is present and positive.
    ///
    /// Outstanding entitlements copy their allotment/expiry from these fields
    /// at purchase time, so a malformed package must never be persisted.
    pub fn check_kind_fields(
        kind: PackageKind,
        class_count: Option<i32>,
        duration_days: Option<i32>,
    ) -> AppResult<()> {
        match kind {
            PackageKind::ClassCount => match class_count {
                Some(n) if n > 0 => Ok(()),
                _ => Err(AppError::validation(
                    "class_count packages require a positive class_count",
                )),
            },
            PackageKind::TimeBased => match duration_days {
                Some(d) if d > 0 => Ok(()),
                _ => Err(AppError::validation(
                    "time_based packages require a positive duration_days",
                )),
            },
        }
    }
}

/// Data required to create a new package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePackage {
    /// Owning company.
    pub company_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Package kind.
    pub kind: PackageKind,
    /// Number of classes granted (class-count packages only).
    pub class_count: Option<i32>,
    /// Validity window in days (time-based packages only).
    pub duration_days: Option<i32>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
}

/// Data for updating a package. `None` fields are left unchanged.
///
/// The kind and its sizing fields are immutable after creation because
/// outstanding entitlements were minted from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePackage {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price in the smallest currency unit.
    pub price_cents: Option<i64>,
}
