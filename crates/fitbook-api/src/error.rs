//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use fitbook_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>` so the `?` operator converts
/// service errors straight into responses.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidPayment => StatusCode::PAYMENT_REQUIRED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict
            | ErrorKind::ClassFull
            | ErrorKind::AlreadyBooked
            | ErrorKind::Exhausted
            | ErrorKind::Expired => StatusCode::CONFLICT,
            ErrorKind::Transient | ErrorKind::ServiceUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::ExternalService
            | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_domain_conflicts_map_to_409() {
        assert_eq!(status_of(AppError::class_full("full")), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::already_booked("dup")),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(AppError::exhausted("none")), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::expired("late")), StatusCode::CONFLICT);
    }

    #[test]
    fn test_payment_and_retry_mapping() {
        assert_eq!(
            status_of(AppError::invalid_payment("unpaid")),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            status_of(AppError::transient("pool timeout")),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_identity_mapping() {
        assert_eq!(
            status_of(AppError::authentication("no token")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::authorization("not yours")),
            StatusCode::FORBIDDEN
        );
    }
}
