//! Route definitions for the FitBook HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(class_routes())
        .merge(booking_routes())
        .merge(company_routes())
        .merge(package_routes())
        .merge(payment_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Class session browsing and schedule management
fn class_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(handlers::class_session::list_classes))
        .route("/classes", post(handlers::class_session::create_class))
        .route("/classes/{id}", get(handlers::class_session::get_class))
        .route("/classes/{id}", put(handlers::class_session::update_class))
        .route(
            "/classes/{id}",
            delete(handlers::class_session::delete_class),
        )
}

/// Booking and cancellation
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::create_booking))
        .route("/bookings", get(handlers::booking::list_bookings))
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
}

/// Company registration and profiles
fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", post(handlers::company::register_company))
        .route("/companies/me", put(handlers::company::update_own_company))
        .route("/companies/{id}", get(handlers::company::get_company))
        .route(
            "/companies/{id}/packages",
            get(handlers::package::list_company_packages),
        )
}

/// Package catalog management
fn package_routes() -> Router<AppState> {
    Router::new()
        .route("/packages", post(handlers::package::create_package))
        .route("/packages/{id}", put(handlers::package::update_package))
        .route(
            "/packages/{id}/deactivate",
            post(handlers::package::deactivate_package),
        )
}

/// Payment verification and entitlements
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments/verify", post(handlers::payment::verify_payment))
        .route("/entitlements", get(handlers::payment::list_entitlements))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
