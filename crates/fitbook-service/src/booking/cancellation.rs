//! Cancellation: the compensating transaction for a booking.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use fitbook_core::error::AppError;
use fitbook_core::result::AppResult;
use fitbook_database::repositories::booking::BookingRepository;
use fitbook_database::repositories::class_session::{ClassSessionRepository, ReleaseOutcome};
use fitbook_database::repositories::entitlement::EntitlementRepository;
use fitbook_database::repositories::map_sqlx_err;
use fitbook_entity::booking::{Booking, BookingStatus};

use crate::context::RequestContext;

/// Cancels bookings and reverses their ledger effects.
///
/// Cancellation is idempotent: cancelling an already-cancelled booking
/// succeeds without touching either ledger, so a double-submitted cancel
/// can never release a seat or restore a class twice. The guarded
/// status flip in [`BookingRepository::mark_cancelled`] is what decides
/// which caller performs the reversal.
#[derive(Debug, Clone)]
pub struct CancellationService {
    pool: PgPool,
    booking_repo: Arc<BookingRepository>,
}

impl CancellationService {
    /// Creates a new cancellation service.
    pub fn new(pool: PgPool, booking_repo: Arc<BookingRepository>) -> Self {
        Self { pool, booking_repo }
    }

    /// Cancel a booking on behalf of the authenticated user.
    ///
    /// Allowed for the booking's owner, the owning company of the session,
    /// and admins. Returns the booking row in its cancelled state.
    pub async fn cancel(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_err("Failed to begin cancellation transaction", e))?;

        let booking = BookingRepository::fetch(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if booking.user_id != ctx.user_id {
            let session = ClassSessionRepository::fetch(&mut *tx, booking.class_session_id)
                .await?
                .ok_or_else(|| AppError::not_found("Class session not found"))?;
            if !ctx.can_manage_company(session.company_id) {
                return Err(AppError::authorization(
                    "Not allowed to cancel this booking",
                ));
            }
        }

        if booking.status == BookingStatus::Cancelled {
            return Ok(booking);
        }

        // Only the caller whose guarded flip lands performs the reversal;
        // a concurrent cancel that lost the race returns the final row.
        let Some(cancelled) = BookingRepository::mark_cancelled(&mut *tx, booking_id).await? else {
            drop(tx);
            return self
                .booking_repo
                .find_by_id(booking_id)
                .await?
                .ok_or_else(|| AppError::not_found("Booking not found"));
        };

        match ClassSessionRepository::release(&mut *tx, cancelled.class_session_id).await? {
            ReleaseOutcome::Released => {}
            ReleaseOutcome::NotFound => {
                warn!(
                    booking_id = %booking_id,
                    session_id = %cancelled.class_session_id,
                    "Cancelled booking references a missing class session"
                );
            }
        }

        if let Some(entitlement_id) = cancelled.entitlement_id {
            // A missing entitlement row is a dangling reference; the
            // cancellation itself still stands.
            EntitlementRepository::restore(&mut *tx, entitlement_id).await?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_err("Failed to commit cancellation transaction", e))?;

        info!(
            booking_id = %cancelled.id,
            session_id = %cancelled.class_session_id,
            user_id = %cancelled.user_id,
            "Booking cancelled"
        );

        Ok(cancelled)
    }
}
