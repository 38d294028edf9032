//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use fitbook_entity::package::PackageKind;

/// Create class session request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClassRequest {
    /// Class title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Instructor name.
    #[validate(length(min = 1, max = 255))]
    pub instructor: String,
    /// Class type (yoga, hiit, pilates, ...).
    #[validate(length(min = 1, max = 100))]
    pub class_type: String,
    /// Difficulty level.
    pub difficulty: Option<String>,
    /// Scheduled start time.
    pub starts_at: DateTime<Utc>,
    /// Duration in minutes.
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: i32,
    /// Maximum number of confirmed bookings.
    #[validate(range(min = 1))]
    pub capacity: i32,
}

/// Update class session request. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClassRequest {
    /// New title.
    pub title: Option<String>,
    /// New instructor.
    pub instructor: Option<String>,
    /// New class type.
    pub class_type: Option<String>,
    /// New difficulty.
    pub difficulty: Option<String>,
    /// New start time.
    pub starts_at: Option<DateTime<Utc>>,
    /// New duration.
    pub duration_minutes: Option<i32>,
}

/// Book a class request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// The session to book.
    pub class_session_id: Uuid,
    /// Entitlement to pay with; omit for drop-in bookings.
    pub entitlement_id: Option<Uuid>,
}

/// Register company request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterCompanyRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub company_name: String,
    /// Contact email.
    #[validate(email)]
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

/// Update company request. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCompanyRequest {
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

/// Create package request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePackageRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255))]
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
    #[validate(range(min = 0))]
    pub price_cents: i64,
}

/// Update package request. Absent fields are left unchanged.
/// The kind and its sizing fields are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePackageRequest {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price in the smallest currency unit.
    pub price_cents: Option<i64>,
}

/// Verify payment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyPaymentRequest {
    /// Provider-side checkout session identifier.
    #[validate(length(min = 1))]
    pub session_id: String,
}
