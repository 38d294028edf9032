//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// A user's reservation against a class session.
///
/// At most one `confirmed` booking may exist per (user, session) pair; the
/// database enforces this with a partial unique index.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The booked class session.
    pub class_session_id: Uuid,
    /// The booking user.
    pub user_id: Uuid,
    /// The entitlement consumed to pay for this booking, if any.
    pub entitlement_id: Option<Uuid>,
    /// Current status.
    pub status: BookingStatus,
    /// When the booking was made.
    pub booked_at: DateTime<Utc>,
    /// When the booking was cancelled, if it was.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Whether this booking currently holds a seat.
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// Data required to insert a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The class session to book.
    pub class_session_id: Uuid,
    /// The booking user.
    pub user_id: Uuid,
    /// Entitlement consumed for this booking, if paying via package.
    pub entitlement_id: Option<Uuid>,
}
