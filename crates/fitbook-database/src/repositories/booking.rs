//! Booking repository.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use fitbook_core::result::AppResult;
use fitbook_entity::booking::{Booking, CreateBooking};

use super::map_sqlx_err;

/// Result of a booking insert attempt.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// The booking row was created.
    Inserted(Booking),
    /// The partial unique index rejected a second confirmed booking
    /// for the same (user, session) pair.
    Duplicate,
}

/// Repository for booking rows.
///
/// Duplicate protection is the `bookings_one_confirmed_per_user_session`
/// partial unique index, not an application-level existence check; a prior
/// read would be racy under concurrent duplicate submissions.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a confirmed booking inside a transaction.
    pub async fn insert_confirmed(
        conn: &mut PgConnection,
        data: &CreateBooking,
    ) -> AppResult<InsertOutcome> {
        let result = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (class_session_id, user_id, entitlement_id, status) \
             VALUES ($1, $2, $3, 'confirmed') RETURNING *",
        )
        .bind(data.class_session_id)
        .bind(data.user_id)
        .bind(data.entitlement_id)
        .fetch_one(&mut *conn)
        .await;

        match result {
            Ok(booking) => Ok(InsertOutcome::Inserted(booking)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(map_sqlx_err("Failed to insert booking", e)),
        }
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("Failed to find booking", e))
    }

    /// Fetch a booking by ID inside a transaction.
    pub async fn fetch(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_err("Failed to fetch booking", e))
    }

    /// Flip a confirmed booking to cancelled. Returns the updated row, or
    /// `None` when the booking was not in `confirmed` state.
    pub async fn mark_cancelled(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', cancelled_at = NOW() \
             WHERE id = $1 AND status = 'confirmed' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_err("Failed to cancel booking", e))
    }

    /// List a user's bookings, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY booked_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to list user bookings", e))
    }
}
