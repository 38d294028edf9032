//! HTTP request handlers, organized by domain.

pub mod booking;
pub mod class_session;
pub mod company;
pub mod health;
pub mod package;
pub mod payment;

use fitbook_core::error::AppError;
use validator::Validate;

use crate::error::ApiError;

/// Run declarative validation on a request body.
pub(crate) fn validate_body<T: Validate>(body: &T) -> Result<(), ApiError> {
    body.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))
}
