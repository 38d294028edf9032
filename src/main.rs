//! FitBook server: class booking platform for wellness companies.
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use fitbook_core::config::AppConfig;
use fitbook_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("FITBOOK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FitBook v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = fitbook_database::connection::DatabasePool::connect(&config.database).await?;
    db.health_check().await?;
    fitbook_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.pool().clone();

    // ── Repositories ─────────────────────────────────────────────
    let session_repo = Arc::new(
        fitbook_database::repositories::class_session::ClassSessionRepository::new(db_pool.clone()),
    );
    let booking_repo = Arc::new(fitbook_database::repositories::booking::BookingRepository::new(
        db_pool.clone(),
    ));
    let entitlement_repo = Arc::new(
        fitbook_database::repositories::entitlement::EntitlementRepository::new(db_pool.clone()),
    );
    let package_repo = Arc::new(fitbook_database::repositories::package::PackageRepository::new(
        db_pool.clone(),
    ));
    let company_repo = Arc::new(fitbook_database::repositories::company::CompanyRepository::new(
        db_pool.clone(),
    ));

    // ── Auth ─────────────────────────────────────────────────────
    let token_verifier = Arc::new(fitbook_api::auth::TokenVerifier::new(&config.auth));

    // ── Payment provider ─────────────────────────────────────────
    let stripe_client = fitbook_service::payment::StripeClient::new(&config.payment)?;
    let checkout_provider: Arc<dyn fitbook_core::traits::payment::CheckoutProvider> =
        Arc::new(stripe_client);

    // ── Services ─────────────────────────────────────────────────
    let booking_service = Arc::new(fitbook_service::booking::BookingService::new(
        db_pool.clone(),
        Arc::clone(&booking_repo),
        Arc::clone(&session_repo),
        Arc::clone(&entitlement_repo),
    ));
    let cancellation_service = Arc::new(fitbook_service::booking::CancellationService::new(
        db_pool.clone(),
        Arc::clone(&booking_repo),
    ));
    let class_session_service = Arc::new(fitbook_service::class_session::ClassSessionService::new(
        Arc::clone(&session_repo),
    ));
    let package_service = Arc::new(fitbook_service::package::PackageService::new(Arc::clone(
        &package_repo,
    )));
    let company_service = Arc::new(fitbook_service::company::CompanyService::new(Arc::clone(
        &company_repo,
    )));
    let payment_service = Arc::new(fitbook_service::payment::PaymentService::new(
        Arc::clone(&checkout_provider),
        Arc::clone(&entitlement_repo),
        Arc::clone(&package_repo),
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = fitbook_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        token_verifier,
        booking_service,
        cancellation_service,
        class_session_service,
        package_service,
        company_service,
        payment_service,
    };

    let app = fitbook_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FitBook server listening on {addr}");

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = drain_tx.send(());
    });

    serve_with_deadline(server.into_future(), drain_rx, grace).await?;

    db.close().await;
    tracing::info!("FitBook server shut down gracefully");
    Ok(())
}

/// Drive the server future, bounding connection drain after shutdown.
///
/// `signal_fired` resolves once the shutdown signal arrives; from that point
/// the server gets `grace` to finish draining before the remaining
/// connections are dropped.
async fn serve_with_deadline(
    server: impl Future<Output = std::io::Result<()>>,
    signal_fired: tokio::sync::oneshot::Receiver<()>,
    grace: Duration,
) -> Result<(), AppError> {
    tokio::select! {
        result = server => result.map_err(|e| AppError::internal(format!("Server error: {e}"))),
        _ = async {
            let _ = signal_fired.await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!("Shutdown grace period elapsed, dropping remaining connections");
            Ok(())
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
