//! Entitlement repository and the entitlement ledger.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use fitbook_core::result::AppResult;
use fitbook_entity::entitlement::{CreateEntitlement, Entitlement};

use super::map_sqlx_err;

/// Result of an entitlement consumption attempt.
#[derive(Debug, Clone)]
pub enum ConsumeOutcome {
    /// One use was charged (count-based decremented; time-based passed the
    /// expiry guard untouched). Carries the updated row.
    Consumed(Entitlement),
    /// A count-based entitlement has no remaining classes.
    Exhausted,
    /// A time-based entitlement's window has passed.
    Expired,
    /// No such entitlement.
    NotFound,
}

/// Result of an entitlement restore attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Count-based: one class returned (capped at the original allotment).
    /// Time-based: no-op success, cancellation never extends validity.
    Restored,
    /// No such entitlement.
    NotFound,
}

/// Repository for entitlement rows.
///
/// `consume` and `restore` are single guarded `UPDATE` statements so
/// concurrent bookings can never double-spend a remaining class. Creation is
/// idempotent on `payment_reference` to absorb checkout verification retries.
#[derive(Debug, Clone)]
pub struct EntitlementRepository {
    pool: PgPool,
}

impl EntitlementRepository {
    /// Create a new entitlement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically charge one use against an entitlement.
    ///
    /// Count-based rows decrement `remaining_classes` and deactivate on
    /// reaching zero. Time-based rows pass the expiry guard without any
    /// decrement (unlimited use within the window).
    pub async fn consume(conn: &mut PgConnection, id: Uuid) -> AppResult<ConsumeOutcome> {
        let updated = sqlx::query_as::<_, Entitlement>(
            "UPDATE entitlements SET \
             remaining_classes = CASE \
                 WHEN remaining_classes IS NULL THEN NULL \
                 ELSE remaining_classes - 1 \
             END, \
             is_active = CASE WHEN remaining_classes = 1 THEN FALSE ELSE is_active END \
             WHERE id = $1 \
               AND is_active = TRUE \
               AND (remaining_classes IS NULL OR remaining_classes > 0) \
               AND (expires_at IS NULL OR expires_at > NOW()) \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_err("Failed to consume entitlement", e))?;

        if let Some(entitlement) = updated {
            return Ok(ConsumeOutcome::Consumed(entitlement));
        }

        Self::diagnose_consume_failure(conn, id).await
    }

    /// Classify why the guarded consume update matched no row.
    async fn diagnose_consume_failure(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<ConsumeOutcome> {
        let row = sqlx::query_as::<_, Entitlement>("SELECT * FROM entitlements WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_err("Failed to inspect entitlement", e))?;

        let Some(entitlement) = row else {
            return Ok(ConsumeOutcome::NotFound);
        };

        if entitlement.expires_at.is_some() {
            return Ok(ConsumeOutcome::Expired);
        }

        Ok(ConsumeOutcome::Exhausted)
    }

    /// Flip a lapsed time-based entitlement inactive so later reads agree.
    ///
    /// Runs on the pool rather than a caller's transaction: a failed booking
    /// rolls its transaction back, and this update must survive that.
    pub async fn deactivate_expired(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE entitlements SET is_active = FALSE \
             WHERE id = $1 AND expires_at IS NOT NULL AND expires_at <= NOW()",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to deactivate expired entitlement", e))?;
        Ok(())
    }

    /// Atomically return one use to a count-based entitlement, never
    /// exceeding the original allotment. Reactivates an exhausted row.
    pub async fn restore(conn: &mut PgConnection, id: Uuid) -> AppResult<RestoreOutcome> {
        let result = sqlx::query(
            "UPDATE entitlements SET \
             remaining_classes = LEAST(remaining_classes + 1, total_classes), \
             is_active = TRUE \
             WHERE id = $1 AND remaining_classes IS NOT NULL",
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_err("Failed to restore entitlement", e))?;

        if result.rows_affected() > 0 {
            return Ok(RestoreOutcome::Restored);
        }

        // Time-based rows are not restorable; still a success if the row exists.
        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM entitlements WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_err("Failed to check entitlement existence", e))?;

        Ok(if exists.is_some() {
            RestoreOutcome::Restored
        } else {
            RestoreOutcome::NotFound
        })
    }

    /// Mint an entitlement, idempotent on `payment_reference`.
    ///
    /// Returns the row plus whether this call created it. A retried
    /// verification returns the original row rather than a duplicate.
    pub async fn create_idempotent(
        &self,
        data: &CreateEntitlement,
    ) -> AppResult<(Entitlement, bool)> {
        let inserted = sqlx::query_as::<_, Entitlement>(
            "INSERT INTO entitlements \
             (user_id, package_id, company_id, payment_reference, \
              remaining_classes, total_classes, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (payment_reference) DO NOTHING \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.package_id)
        .bind(data.company_id)
        .bind(&data.payment_reference)
        .bind(data.remaining_classes)
        .bind(data.total_classes)
        .bind(data.expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to create entitlement", e))?;

        if let Some(entitlement) = inserted {
            return Ok((entitlement, true));
        }

        let existing = self
            .find_by_payment_reference(&data.payment_reference)
            .await?
            .ok_or_else(|| {
                fitbook_core::AppError::internal(
                    "Entitlement insert conflicted but no row found for payment reference",
                )
            })?;
        Ok((existing, false))
    }

    /// Fetch an entitlement by ID inside a transaction.
    pub async fn fetch(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Entitlement>> {
        sqlx::query_as::<_, Entitlement>("SELECT * FROM entitlements WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_err("Failed to fetch entitlement", e))
    }

    /// Find an entitlement by its payment reference.
    pub async fn find_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> AppResult<Option<Entitlement>> {
        sqlx::query_as::<_, Entitlement>(
            "SELECT * FROM entitlements WHERE payment_reference = $1",
        )
        .bind(payment_reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to find entitlement by payment reference", e))
    }

    /// List a user's entitlements, active and usable first, newest purchase first.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Entitlement>> {
        sqlx::query_as::<_, Entitlement>(
            "SELECT * FROM entitlements WHERE user_id = $1 \
             ORDER BY is_active DESC, purchased_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to list user entitlements", e))
    }
}
