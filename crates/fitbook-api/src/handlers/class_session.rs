//! Class session handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use fitbook_core::error::AppError;
use fitbook_core::types::pagination::{PageRequest, PageResponse};
use fitbook_entity::class_session::{CreateClassSession, UpdateClassSession};

use crate::dto::request::{CreateClassRequest, UpdateClassRequest};
use crate::dto::response::{ApiResponse, ClassSessionResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validate_body;
use crate::state::AppState;

/// GET /api/classes
pub async fn list_classes(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<ClassSessionResponse>>>, ApiError> {
    let page = PageRequest::new(page.page, page.page_size);
    let sessions = state.class_session_service.list_upcoming(page).await?;

    let items = sessions
        .items
        .into_iter()
        .map(ClassSessionResponse::from)
        .collect();
    Ok(Json(ApiResponse::ok(PageResponse {
        items,
        page: sessions.page,
        page_size: sessions.page_size,
        total_items: sessions.total_items,
        total_pages: sessions.total_pages,
        has_next: sessions.has_next,
        has_previous: sessions.has_previous,
    })))
}

/// GET /api/classes/{id}
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClassSessionResponse>>, ApiError> {
    let session = state.class_session_service.get(id).await?;
    Ok(Json(ApiResponse::ok(session.into())))
}

/// POST /api/classes
pub async fn create_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateClassRequest>,
) -> Result<Json<ApiResponse<ClassSessionResponse>>, ApiError> {
    validate_body(&req)?;

    let company_id = auth
        .company_id
        .ok_or_else(|| AppError::authorization("Only companies can schedule classes"))?;

    let session = state
        .class_session_service
        .create(
            &auth,
            CreateClassSession {
                company_id,
                title: req.title,
                instructor: req.instructor,
                class_type: req.class_type,
                difficulty: req.difficulty,
                starts_at: req.starts_at,
                duration_minutes: req.duration_minutes,
                capacity: req.capacity,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(session.into())))
}

/// PUT /api/classes/{id}
pub async fn update_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClassRequest>,
) -> Result<Json<ApiResponse<ClassSessionResponse>>, ApiError> {
    let session = state
        .class_session_service
        .update(
            &auth,
            id,
            UpdateClassSession {
                title: req.title,
                instructor: req.instructor,
                class_type: req.class_type,
                difficulty: req.difficulty,
                starts_at: req.starts_at,
                duration_minutes: req.duration_minutes,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(session.into())))
}

/// DELETE /api/classes/{id}
pub async fn delete_class(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.class_session_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Class session deleted".to_string(),
    })))
}
