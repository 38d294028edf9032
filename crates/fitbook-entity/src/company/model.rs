//! Company entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A wellness company that lists class sessions and sells packages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: Uuid,
    /// The hosted-auth user who owns this company.
    pub user_id: Uuid,
    /// Display name.
    pub company_name: String,
    /// Contact email.
    pub contact_email: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Whether the platform has approved this company's listings.
    pub is_approved: bool,
    /// When the company was registered.
    pub created_at: DateTime<Utc>,
    /// When the company profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register a new company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCompany {
    /// Owning user.
    pub user_id: Uuid,
    /// Display name.
    pub company_name: String,
    /// Contact email.
    pub contact_email: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

/// Data for updating an existing company profile. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCompany {
    /// New display name.
    pub company_name: Option<String>,
    /// New contact email.
    pub contact_email: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New website URL.
    pub website: Option<String>,
    /// New street address.
    pub address: Option<String>,
}
