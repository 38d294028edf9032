//! Class session repository and the capacity ledger.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use fitbook_core::result::AppResult;
use fitbook_core::types::pagination::PageRequest;
use fitbook_entity::class_session::{ClassSession, CreateClassSession, UpdateClassSession};

use super::map_sqlx_err;

/// Result of a capacity reservation attempt.
#[derive(Debug, Clone)]
pub enum ReserveOutcome {
    /// A seat was taken; carries the updated session row.
    Reserved(ClassSession),
    /// Every seat is already confirmed.
    Full,
    /// No such session (or it was soft-deleted).
    NotFound,
}

/// Result of a capacity release attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// One seat was returned (or the count was already zero).
    Released,
    /// No such session.
    NotFound,
}

/// Repository for class sessions.
///
/// The `reserve`/`release` pair is the capacity ledger: both are single
/// guarded `UPDATE` statements, so two concurrent reservations can never
/// both observe a free seat. They take `&mut PgConnection` to compose into
/// the booking services' transactions.
#[derive(Debug, Clone)]
pub struct ClassSessionRepository {
    pool: PgPool,
}

impl ClassSessionRepository {
    /// Create a new class session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically claim one seat if any remain.
    pub async fn reserve(conn: &mut PgConnection, session_id: Uuid) -> AppResult<ReserveOutcome> {
        let updated = sqlx::query_as::<_, ClassSession>(
            "UPDATE class_sessions \
             SET confirmed_count = confirmed_count + 1 \
             WHERE id = $1 AND deleted_at IS NULL AND confirmed_count < capacity \
             RETURNING *",
        )
        .bind(session_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_err("Failed to reserve class capacity", e))?;

        if let Some(session) = updated {
            return Ok(ReserveOutcome::Reserved(session));
        }

        // Guard rejected the update: distinguish a full class from a missing one.
        let exists: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM class_sessions WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(session_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_err("Failed to check class session existence", e))?;

        Ok(if exists.is_some() {
            ReserveOutcome::Full
        } else {
            ReserveOutcome::NotFound
        })
    }

    /// Atomically return one seat, floored at zero.
    pub async fn release(conn: &mut PgConnection, session_id: Uuid) -> AppResult<ReleaseOutcome> {
        let result = sqlx::query(
            "UPDATE class_sessions \
             SET confirmed_count = GREATEST(confirmed_count - 1, 0) \
             WHERE id = $1",
        )
        .bind(session_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_err("Failed to release class capacity", e))?;

        Ok(if result.rows_affected() > 0 {
            ReleaseOutcome::Released
        } else {
            ReleaseOutcome::NotFound
        })
    }

    /// Find a session by ID (including soft-deleted rows).
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ClassSession>> {
        sqlx::query_as::<_, ClassSession>("SELECT * FROM class_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("Failed to find class session", e))
    }

    /// Fetch a session by ID inside a transaction (including soft-deleted rows).
    pub async fn fetch(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<ClassSession>> {
        sqlx::query_as::<_, ClassSession>("SELECT * FROM class_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_err("Failed to fetch class session", e))
    }

    /// List upcoming live sessions, soonest first.
    pub async fn list_upcoming(
        &self,
        after: DateTime<Utc>,
        page: &PageRequest,
    ) -> AppResult<Vec<ClassSession>> {
        sqlx::query_as::<_, ClassSession>(
            "SELECT * FROM class_sessions \
             WHERE deleted_at IS NULL AND starts_at > $1 \
             ORDER BY starts_at ASC \
             LIMIT $2 OFFSET $3",
        )
        .bind(after)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to list upcoming class sessions", e))
    }

    /// Count upcoming live sessions.
    pub async fn count_upcoming(&self, after: DateTime<Utc>) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM class_sessions WHERE deleted_at IS NULL AND starts_at > $1",
        )
        .bind(after)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to count upcoming class sessions", e))?;
        Ok(count as u64)
    }

    /// Create a session.
    pub async fn create(&self, data: &CreateClassSession) -> AppResult<ClassSession> {
        sqlx::query_as::<_, ClassSession>(
            "INSERT INTO class_sessions \
             (company_id, title, instructor, class_type, difficulty, starts_at, duration_minutes, capacity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.company_id)
        .bind(&data.title)
        .bind(&data.instructor)
        .bind(&data.class_type)
        .bind(&data.difficulty)
        .bind(data.starts_at)
        .bind(data.duration_minutes)
        .bind(data.capacity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to create class session", e))
    }

    /// Apply a partial update to a live session.
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateClassSession,
    ) -> AppResult<Option<ClassSession>> {
        sqlx::query_as::<_, ClassSession>(
            "UPDATE class_sessions SET \
             title = COALESCE($2, title), \
             instructor = COALESCE($3, instructor), \
             class_type = COALESCE($4, class_type), \
             difficulty = COALESCE($5, difficulty), \
             starts_at = COALESCE($6, starts_at), \
             duration_minutes = COALESCE($7, duration_minutes) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.instructor)
        .bind(&data.class_type)
        .bind(&data.difficulty)
        .bind(data.starts_at)
        .bind(data.duration_minutes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to update class session", e))
    }

    /// Soft-delete a session so it stops accepting reservations.
    ///
    /// Existing bookings keep referencing the row (audit trail) and can
    /// still be cancelled; `release` has no `deleted_at` guard.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE class_sessions SET deleted_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to soft-delete class session", e))?;
        Ok(result.rows_affected() > 0)
    }
}
