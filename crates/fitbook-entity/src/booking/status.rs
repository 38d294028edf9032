//! Booking status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a booking.
///
/// Bookings are never hard-deleted; cancellation is the only transition and
/// it is performed exclusively by the cancellation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Seat is held; counted in the session's `confirmed_count`.
    Confirmed,
    /// Seat released; kept for the audit trail.
    Cancelled,
}

impl BookingStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
