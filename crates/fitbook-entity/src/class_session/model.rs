//! Class session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One scheduled occurrence of a fitness class with a fixed capacity.
///
/// `confirmed_count` is the capacity ledger: it is mutated only through the
/// guarded `reserve`/`release` repository operations, never by plain writes,
/// so `0 <= confirmed_count <= capacity` holds at all times.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Class title.
    pub title: String,
    /// Instructor name.
    pub instructor: String,
    /// Class type (yoga, hiit, pilates, ...).
    pub class_type: String,
    /// Difficulty level, free-form (Beginner/Intermediate/Advanced).
    pub difficulty: Option<String>,
    /// Scheduled start time.
    pub starts_at: DateTime<Utc>,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Maximum number of confirmed bookings.
    pub capacity: i32,
    /// Current number of confirmed bookings.
    pub confirmed_count: i32,
    /// Soft-delete marker; a deleted session accepts no new reservations.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl ClassSession {
    /// Whether every seat is taken.
    pub fn is_full(&self) -> bool {
        self.confirmed_count >= self.capacity
    }

    /// Remaining free seats.
    pub fn spots_left(&self) -> i32 {
        (self.capacity - self.confirmed_count).max(0)
    }

    /// Whether the session has already started at `now`.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }

    /// Whether the session has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new class session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassSession {
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
    /// Maximum number of confirmed bookings.
    pub capacity: i32,
}

/// Data for updating a session. `None` fields are left unchanged.
///
/// Capacity and `confirmed_count` are deliberately absent: capacity changes
/// would invalidate the ledger invariant for already-booked sessions, and the
/// count is owned by the booking services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClassSession {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(capacity: i32, confirmed: i32, starts_in_minutes: i64) -> ClassSession {
        ClassSession {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Morning Yoga".to_string(),
            instructor: "Ava".to_string(),
            class_type: "yoga".to_string(),
            difficulty: Some("Beginner".to_string()),
            starts_at: Utc::now() + Duration::minutes(starts_in_minutes),
            duration_minutes: 60,
            capacity,
            confirmed_count: confirmed,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fullness_and_spots() {
        let s = session(10, 7, 60);
        assert!(!s.is_full());
        assert_eq!(s.spots_left(), 3);

        let full = session(10, 10, 60);
        assert!(full.is_full());
        assert_eq!(full.spots_left(), 0);
    }

    #[test]
    fn test_has_started() {
        let now = Utc::now();
        assert!(session(10, 0, -5).has_started(now));
        assert!(!session(10, 0, 5).has_started(now));
    }
}
