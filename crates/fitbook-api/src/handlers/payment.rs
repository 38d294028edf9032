//! Payment verification and entitlement handlers.

use axum::Json;
use axum::extract::State;

use fitbook_service::payment::VerifyPaymentRequest as SvcVerifyPayment;

use crate::dto::request::VerifyPaymentRequest;
use crate::dto::response::{ApiResponse, EntitlementResponse, VerifyPaymentResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validate_body;
use crate::state::AppState;

/// POST /api/payments/verify
pub async fn verify_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Json<ApiResponse<VerifyPaymentResponse>>, ApiError> {
    validate_body(&req)?;

    let result = state
        .payment_service
        .verify_and_reconcile(
            &auth,
            SvcVerifyPayment {
                checkout_session_id: req.session_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(VerifyPaymentResponse {
        entitlement: result.entitlement.into(),
        created: result.created,
    })))
}

/// GET /api/entitlements
pub async fn list_entitlements(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<EntitlementResponse>>>, ApiError> {
    let entitlements = state.payment_service.list_entitlements(&auth).await?;
    Ok(Json(ApiResponse::ok(
        entitlements
            .into_iter()
            .map(EntitlementResponse::from)
            .collect(),
    )))
}
