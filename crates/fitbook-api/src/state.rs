//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use fitbook_core::config::AppConfig;

use fitbook_service::booking::{BookingService, CancellationService};
use fitbook_service::class_session::ClassSessionService;
use fitbook_service::company::CompanyService;
use fitbook_service::package::PackageService;
use fitbook_service::payment::PaymentService;

use crate::auth::TokenVerifier;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Identity token verifier
    pub token_verifier: Arc<TokenVerifier>,

    /// Booking service
    pub booking_service: Arc<BookingService>,
    /// Cancellation service
    pub cancellation_service: Arc<CancellationService>,
    /// Class session service
    pub class_session_service: Arc<ClassSessionService>,
    /// Package service
    pub package_service: Arc<PackageService>,
    /// Company service
    pub company_service: Arc<CompanyService>,
    /// Payment reconciliation service
    pub payment_service: Arc<PaymentService>,
}
