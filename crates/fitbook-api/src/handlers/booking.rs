//! Booking handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use fitbook_service::booking::BookClassRequest;

use crate::dto::request::CreateBookingRequest;
use crate::dto::response::{ApiResponse, BookingResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state
        .booking_service
        .book(
            &auth,
            BookClassRequest {
                class_session_id: req.class_session_id,
                entitlement_id: req.entitlement_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(booking.into())))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<BookingResponse>>>, ApiError> {
    let bookings = state.booking_service.list_for_user(&auth).await?;
    Ok(Json(ApiResponse::ok(
        bookings.into_iter().map(BookingResponse::from).collect(),
    )))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state.booking_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(booking.into())))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state.cancellation_service.cancel(&auth, id).await?;
    Ok(Json(ApiResponse::ok(booking.into())))
}
