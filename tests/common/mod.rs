//! Shared test helpers for integration tests.
//!
//! These tests require a running PostgreSQL instance (see config/test.toml)
//! and are marked `#[ignore]` so plain `cargo test` skips them. Each
//! `TestApp::new()` wipes the shared test database, so run them serially:
//! `cargo test -- --ignored --test-threads=1`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Duration, Utc};
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use fitbook_core::config::AppConfig;
use fitbook_core::error::AppError;
use fitbook_core::result::AppResult;
use fitbook_core::traits::payment::{CheckoutProvider, CheckoutSession};
use fitbook_entity::account::AccountRole;

/// In-memory checkout provider; tests insert the sessions they expect.
#[derive(Debug, Default)]
pub struct MockCheckoutProvider {
    sessions: Mutex<HashMap<String, CheckoutSession>>,
}

impl MockCheckoutProvider {
    /// Register a checkout session the provider will report.
    pub fn insert(&self, session: CheckoutSession) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), session);
    }
}

#[async_trait::async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    async fn fetch_checkout_session(&self, session_id: &str) -> AppResult<CheckoutSession> {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| AppError::invalid_payment("No such checkout session"))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Mock payment provider shared with the payment service
    pub checkout_provider: Arc<MockCheckoutProvider>,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db = fitbook_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        fitbook_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        let db_pool = db.pool().clone();

        Self::clean_database(&db_pool).await;

        let session_repo = Arc::new(
            fitbook_database::repositories::class_session::ClassSessionRepository::new(
                db_pool.clone(),
            ),
        );
        let booking_repo = Arc::new(
            fitbook_database::repositories::booking::BookingRepository::new(db_pool.clone()),
        );
        let entitlement_repo = Arc::new(
            fitbook_database::repositories::entitlement::EntitlementRepository::new(
                db_pool.clone(),
            ),
        );
        let package_repo = Arc::new(
            fitbook_database::repositories::package::PackageRepository::new(db_pool.clone()),
        );
        let company_repo = Arc::new(
            fitbook_database::repositories::company::CompanyRepository::new(db_pool.clone()),
        );

        let token_verifier = Arc::new(fitbook_api::auth::TokenVerifier::new(&config.auth));

        let checkout_provider = Arc::new(MockCheckoutProvider::default());
        let provider: Arc<dyn CheckoutProvider> = Arc::clone(&checkout_provider) as _;

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
        let class_session_service = Arc::new(
            fitbook_service::class_session::ClassSessionService::new(Arc::clone(&session_repo)),
        );
        let package_service = Arc::new(fitbook_service::package::PackageService::new(Arc::clone(
            &package_repo,
        )));
        let company_service = Arc::new(fitbook_service::company::CompanyService::new(Arc::clone(
            &company_repo,
        )));
        let payment_service = Arc::new(fitbook_service::payment::PaymentService::new(
            provider,
            Arc::clone(&entitlement_repo),
            Arc::clone(&package_repo),
        ));

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

        let router = fitbook_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            config,
            checkout_provider,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "bookings",
            "entitlements",
            "packages",
            "class_sessions",
            "companies",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Mint an identity token the way the hosted auth provider would
    pub fn token(&self, user_id: Uuid, role: AccountRole, company_id: Option<Uuid>) -> String {
        let now = Utc::now().timestamp();
        let claims = fitbook_api::auth::Claims {
            sub: user_id,
            role,
            company_id,
            iat: now,
            exp: now + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth.jwt_secret.as_bytes()),
        )
        .expect("Failed to mint test token")
    }

    /// Insert a company row and return its ID
    pub async fn create_company(&self, user_id: Uuid) -> Uuid {
        sqlx::query_scalar(
            r#"INSERT INTO companies (user_id, company_name, contact_email, is_approved)
               VALUES ($1, 'Test Studio', 'studio@test.com', TRUE) RETURNING id"#,
        )
        .bind(user_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test company")
    }

    /// Insert a class session and return its ID
    pub async fn create_session(
        &self,
        company_id: Uuid,
        capacity: i32,
        starts_at: DateTime<Utc>,
    ) -> Uuid {
        sqlx::query_scalar(
            r#"INSERT INTO class_sessions
               (company_id, title, instructor, class_type, starts_at, duration_minutes, capacity)
               VALUES ($1, 'Morning Yoga', 'Ava', 'yoga', $2, 60, $3) RETURNING id"#,
        )
        .bind(company_id)
        .bind(starts_at)
        .bind(capacity)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test class session")
    }

    /// Insert a class-count package and return its ID
    pub async fn create_count_package(&self, company_id: Uuid, class_count: i32) -> Uuid {
        sqlx::query_scalar(
            r#"INSERT INTO packages
               (company_id, name, kind, class_count, price_cents)
               VALUES ($1, 'Class Pack', 'class_count', $2, 9900) RETURNING id"#,
        )
        .bind(company_id)
        .bind(class_count)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test package")
    }

    /// Insert a time-based package and return its ID
    pub async fn create_time_package(&self, company_id: Uuid, duration_days: i32) -> Uuid {
        sqlx::query_scalar(
            r#"INSERT INTO packages
               (company_id, name, kind, duration_days, price_cents)
               VALUES ($1, 'Monthly Pass', 'time_based', $2, 4900) RETURNING id"#,
        )
        .bind(company_id)
        .bind(duration_days)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test package")
    }

    /// Insert a count-based entitlement and return its ID
    pub async fn create_count_entitlement(
        &self,
        user_id: Uuid,
        package_id: Uuid,
        company_id: Uuid,
        remaining: i32,
        total: i32,
    ) -> Uuid {
        sqlx::query_scalar(
            r#"INSERT INTO entitlements
               (user_id, package_id, company_id, payment_reference,
                remaining_classes, total_classes, is_active)
               VALUES ($1, $2, $3, $4, $5, $6, $5 > 0) RETURNING id"#,
        )
        .bind(user_id)
        .bind(package_id)
        .bind(company_id)
        .bind(format!("pi_{}", Uuid::new_v4().simple()))
        .bind(remaining)
        .bind(total)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test entitlement")
    }

    /// Insert a time-based entitlement and return its ID
    pub async fn create_time_entitlement(
        &self,
        user_id: Uuid,
        package_id: Uuid,
        company_id: Uuid,
        expires_in_hours: i64,
    ) -> Uuid {
        sqlx::query_scalar(
            r#"INSERT INTO entitlements
               (user_id, package_id, company_id, payment_reference, expires_at, is_active)
               VALUES ($1, $2, $3, $4, $5, TRUE) RETURNING id"#,
        )
        .bind(user_id)
        .bind(package_id)
        .bind(company_id)
        .bind(format!("pi_{}", Uuid::new_v4().simple()))
        .bind(Utc::now() + Duration::hours(expires_in_hours))
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test entitlement")
    }

    /// Read a session's confirmed seat count directly
    pub async fn confirmed_count(&self, session_id: Uuid) -> i32 {
        sqlx::query_scalar("SELECT confirmed_count FROM class_sessions WHERE id = $1")
            .bind(session_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to read confirmed_count")
    }

    /// Read an entitlement's remaining classes and active flag directly
    pub async fn entitlement_state(&self, entitlement_id: Uuid) -> (Option<i32>, bool) {
        sqlx::query_as("SELECT remaining_classes, is_active FROM entitlements WHERE id = $1")
            .bind(entitlement_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to read entitlement")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The machine-readable error code of an error envelope
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or("")
    }
}
