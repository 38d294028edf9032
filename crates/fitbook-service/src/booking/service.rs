//! Booking orchestration: capacity, entitlement, and booking row in one transaction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use fitbook_core::error::AppError;
use fitbook_core::result::AppResult;
use fitbook_database::repositories::booking::{BookingRepository, InsertOutcome};
use fitbook_database::repositories::class_session::{ClassSessionRepository, ReserveOutcome};
use fitbook_database::repositories::entitlement::{ConsumeOutcome, EntitlementRepository};
use fitbook_database::repositories::map_sqlx_err;
use fitbook_entity::booking::{Booking, CreateBooking};

use crate::context::RequestContext;

/// Request to book a seat in a class session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookClassRequest {
    /// The session to book.
    pub class_session_id: Uuid,
    /// Entitlement to pay with; `None` for drop-in bookings.
    pub entitlement_id: Option<Uuid>,
}

/// Books seats in class sessions.
///
/// Capacity reservation, entitlement consumption, and the booking insert all
/// run inside one transaction. Any failure rolls the transaction back, so no
/// partial ledger state ever persists.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Pool used to open booking transactions.
    pool: PgPool,
    /// Booking repository (standalone reads).
    booking_repo: Arc<BookingRepository>,
    /// Class session repository (standalone reads).
    session_repo: Arc<ClassSessionRepository>,
    /// Entitlement repository (pool-level updates outside the transaction).
    entitlement_repo: Arc<EntitlementRepository>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        pool: PgPool,
        booking_repo: Arc<BookingRepository>,
        session_repo: Arc<ClassSessionRepository>,
        entitlement_repo: Arc<EntitlementRepository>,
    ) -> Self {
        Self {
            pool,
            booking_repo,
            session_repo,
            entitlement_repo,
        }
    }

    /// Book a seat for the authenticated user.
    pub async fn book(&self, ctx: &RequestContext, req: BookClassRequest) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_err("Failed to begin booking transaction", e))?;

        let session = ClassSessionRepository::fetch(&mut *tx, req.class_session_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Class session not found"))?;

        if session.has_started(ctx.request_time) {
            return Err(AppError::validation("Class session has already started"));
        }

        match ClassSessionRepository::reserve(&mut *tx, session.id).await? {
            ReserveOutcome::Reserved(_) => {}
            ReserveOutcome::Full => {
                return Err(AppError::class_full("Class is at full capacity"));
            }
            ReserveOutcome::NotFound => {
                return Err(AppError::not_found("Class session not found"));
            }
        }

        if let Some(entitlement_id) = req.entitlement_id {
            let entitlement = EntitlementRepository::fetch(&mut *tx, entitlement_id)
                .await?
                .ok_or_else(|| AppError::not_found("Entitlement not found"))?;

            if entitlement.user_id != ctx.user_id {
                return Err(AppError::authorization(
                    "Entitlement belongs to a different user",
                ));
            }
            if entitlement.company_id != session.company_id {
                return Err(AppError::validation(
                    "Entitlement is not valid for this company's classes",
                ));
            }

            match EntitlementRepository::consume(&mut *tx, entitlement_id).await? {
                ConsumeOutcome::Consumed(_) => {}
                ConsumeOutcome::Exhausted => {
                    return Err(AppError::exhausted("No classes remaining on this package"));
                }
                ConsumeOutcome::Expired => {
                    // The booking transaction rolls back, but the expired row
                    // must still end up inactive so later reads agree.
                    tx.rollback()
                        .await
                        .map_err(|e| map_sqlx_err("Failed to roll back booking transaction", e))?;
                    self.entitlement_repo.deactivate_expired(entitlement_id).await?;
                    return Err(AppError::expired("Package validity window has passed"));
                }
                ConsumeOutcome::NotFound => {
                    return Err(AppError::not_found("Entitlement not found"));
                }
            }
        }

        let booking = match BookingRepository::insert_confirmed(
            &mut *tx,
            &CreateBooking {
                class_session_id: session.id,
                user_id: ctx.user_id,
                entitlement_id: req.entitlement_id,
            },
        )
        .await?
        {
            InsertOutcome::Inserted(booking) => booking,
            InsertOutcome::Duplicate => {
                return Err(AppError::already_booked(
                    "A confirmed booking already exists for this class",
                ));
            }
        };

        tx.commit()
            .await
            .map_err(|e| map_sqlx_err("Failed to commit booking transaction", e))?;

        info!(
            booking_id = %booking.id,
            session_id = %session.id,
            user_id = %ctx.user_id,
            via_entitlement = req.entitlement_id.is_some(),
            "Booking confirmed"
        );

        Ok(booking)
    }

    /// List the authenticated user's bookings.
    pub async fn list_for_user(&self, ctx: &RequestContext) -> AppResult<Vec<Booking>> {
        self.booking_repo.list_for_user(ctx.user_id).await
    }

    /// Get a single booking. Visible to its owner, the session's company,
    /// and admins.
    pub async fn get(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<Booking> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if booking.user_id == ctx.user_id {
            return Ok(booking);
        }

        let session = self
            .session_repo
            .find_by_id(booking.class_session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class session not found"))?;

        if !ctx.can_manage_company(session.company_id) {
            return Err(AppError::authorization(
                "Not allowed to view this booking",
            ));
        }

        Ok(booking)
    }
}
