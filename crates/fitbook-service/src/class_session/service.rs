//! Class session catalog: schedule management for companies, browsing for members.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use fitbook_core::error::AppError;
use fitbook_core::result::AppResult;
use fitbook_core::types::pagination::{PageRequest, PageResponse};
use fitbook_database::repositories::class_session::ClassSessionRepository;
use fitbook_entity::class_session::{ClassSession, CreateClassSession, UpdateClassSession};

use crate::context::RequestContext;

/// Manages the class schedule.
#[derive(Debug, Clone)]
pub struct ClassSessionService {
    session_repo: Arc<ClassSessionRepository>,
}

impl ClassSessionService {
    /// Creates a new class session service.
    pub fn new(session_repo: Arc<ClassSessionRepository>) -> Self {
        Self { session_repo }
    }

    /// List upcoming sessions across all companies, soonest first.
    pub async fn list_upcoming(&self, page: PageRequest) -> AppResult<PageResponse<ClassSession>> {
        let now = Utc::now();
        let sessions = self.session_repo.list_upcoming(now, &page).await?;
        let total = self.session_repo.count_upcoming(now).await?;
        Ok(PageResponse::new(sessions, page.page, page.page_size, total))
    }

    /// Fetch a single live session.
    pub async fn get(&self, session_id: Uuid) -> AppResult<ClassSession> {
        self.session_repo
            .find_by_id(session_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Class session not found"))
    }

    /// Create a session on the acting company's schedule.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateClassSession,
    ) -> AppResult<ClassSession> {
        if !ctx.can_manage_company(data.company_id) {
            return Err(AppError::authorization(
                "Not allowed to schedule classes for this company",
            ));
        }
        if data.capacity <= 0 {
            return Err(AppError::validation("Capacity must be positive"));
        }
        if data.duration_minutes <= 0 {
            return Err(AppError::validation("Duration must be positive"));
        }
        if data.starts_at <= ctx.request_time {
            return Err(AppError::validation("Start time must be in the future"));
        }

        let session = self.session_repo.create(&data).await?;
        info!(session_id = %session.id, company_id = %session.company_id, "Class session created");
        Ok(session)
    }

    /// Update a session's descriptive fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        session_id: Uuid,
        data: UpdateClassSession,
    ) -> AppResult<ClassSession> {
        let session = self.get(session_id).await?;
        if !ctx.can_manage_company(session.company_id) {
            return Err(AppError::authorization(
                "Not allowed to modify this class session",
            ));
        }
        if let Some(duration) = data.duration_minutes {
            if duration <= 0 {
                return Err(AppError::validation("Duration must be positive"));
            }
        }

        self.session_repo
            .update(session_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Class session not found"))
    }

    /// Soft-delete a session so it stops accepting new bookings.
    ///
    /// Existing bookings survive and remain cancellable.
    pub async fn delete(&self, ctx: &RequestContext, session_id: Uuid) -> AppResult<()> {
        let session = self.get(session_id).await?;
        if !ctx.can_manage_company(session.company_id) {
            return Err(AppError::authorization(
                "Not allowed to delete this class session",
            ));
        }

        if self.session_repo.soft_delete(session_id).await? {
            info!(session_id = %session_id, "Class session deleted");
            Ok(())
        } else {
            Err(AppError::not_found("Class session not found"))
        }
    }
}
