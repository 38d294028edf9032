//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fitbook_entity::booking::Booking;
use fitbook_entity::class_session::ClassSession;
use fitbook_entity::company::Company;
use fitbook_entity::entitlement::Entitlement;
use fitbook_entity::package::Package;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
}

/// Class session summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSessionResponse {
    /// Session ID.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Class title.
    pub title: String,
    /// Instructor name.
    pub instructor: String,
    /// Class type.
    pub class_type: String,
    /// Difficulty level.
    pub difficulty: Option<String>,
    /// Scheduled start time.
    pub starts_at: DateTime<Utc>,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Maximum confirmed bookings.
    pub capacity: i32,
    /// Remaining free seats.
    pub spots_left: i32,
}

impl From<ClassSession> for ClassSessionResponse {
    fn from(session: ClassSession) -> Self {
        let spots_left = session.spots_left();
        Self {
            id: session.id,
            company_id: session.company_id,
            title: session.title,
            instructor: session.instructor,
            class_type: session.class_type,
            difficulty: session.difficulty,
            starts_at: session.starts_at,
            duration_minutes: session.duration_minutes,
            capacity: session.capacity,
            spots_left,
        }
    }
}

/// Booking summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    /// Booking ID.
    pub id: Uuid,
    /// Booked session.
    pub class_session_id: Uuid,
    /// Booking owner.
    pub user_id: Uuid,
    /// Entitlement that paid for this booking, if any.
    pub entitlement_id: Option<Uuid>,
    /// Status.
    pub status: String,
    /// When the booking was made.
    pub booked_at: DateTime<Utc>,
    /// When the booking was cancelled, if it was.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            class_session_id: booking.class_session_id,
            user_id: booking.user_id,
            entitlement_id: booking.entitlement_id,
            status: booking.status.to_string(),
            booked_at: booking.booked_at,
            cancelled_at: booking.cancelled_at,
        }
    }
}

/// Company profile for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    /// Company ID.
    pub id: Uuid,
    /// Display name.
    pub company_name: String,
    /// Contact email.
    pub contact_email: String,
    /// Description.
    pub description: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Website.
    pub website: Option<String>,
    /// Address.
    pub address: Option<String>,
    /// Whether the platform has approved this company.
    pub is_approved: bool,
    /// Registered at.
    pub created_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            company_name: company.company_name,
            contact_email: company.contact_email,
            description: company.description,
            phone: company.phone,
            website: company.website,
            address: company.address,
            is_approved: company.is_approved,
            created_at: company.created_at,
        }
    }
}

/// Package summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageResponse {
    /// Package ID.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Package kind.
    pub kind: String,
    /// Classes granted (class-count packages).
    pub class_count: Option<i32>,
    /// Validity window in days (time-based packages).
    pub duration_days: Option<i32>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Whether the package is purchasable.
    pub is_active: bool,
}

impl From<Package> for PackageResponse {
    fn from(package: Package) -> Self {
        Self {
            id: package.id,
            company_id: package.company_id,
            name: package.name,
            description: package.description,
            kind: package.kind.to_string(),
            class_count: package.class_count,
            duration_days: package.duration_days,
            price_cents: package.price_cents,
            is_active: package.is_active,
        }
    }
}

/// Entitlement summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementResponse {
    /// Entitlement ID.
    pub id: Uuid,
    /// Source package.
    pub package_id: Uuid,
    /// Owning company of the package.
    pub company_id: Uuid,
    /// Remaining classes (count-based only).
    pub remaining_classes: Option<i32>,
    /// Original allotment (count-based only).
    pub total_classes: Option<i32>,
    /// Validity deadline (time-based only).
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the entitlement is usable.
    pub is_active: bool,
    /// Purchase time.
    pub purchased_at: DateTime<Utc>,
}

impl From<Entitlement> for EntitlementResponse {
    fn from(entitlement: Entitlement) -> Self {
        Self {
            id: entitlement.id,
            package_id: entitlement.package_id,
            company_id: entitlement.company_id,
            remaining_classes: entitlement.remaining_classes,
            total_classes: entitlement.total_classes,
            expires_at: entitlement.expires_at,
            is_active: entitlement.is_active,
            purchased_at: entitlement.purchased_at,
        }
    }
}

/// Payment verification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    /// The entitlement backing this payment.
    pub entitlement: EntitlementResponse,
    /// Whether this call minted the entitlement.
    pub created: bool,
}
