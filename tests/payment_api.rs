//! Integration tests for payment verification and entitlements.

mod common;

use std::collections::HashMap;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::TestApp;
use fitbook_core::traits::payment::CheckoutSession;
use fitbook_entity::account::AccountRole;

fn checkout_session(
    id: &str,
    payment_status: &str,
    payment_intent: Option<&str>,
    package_id: Uuid,
    user_id: Uuid,
    company_id: Uuid,
) -> CheckoutSession {
    let mut metadata = HashMap::new();
    metadata.insert("package_id".to_string(), package_id.to_string());
    metadata.insert("user_id".to_string(), user_id.to_string());
    metadata.insert("company_id".to_string(), company_id.to_string());
    CheckoutSession {
        id: id.to_string(),
        payment_status: payment_status.to_string(),
        payment_intent: payment_intent.map(String::from),
        metadata,
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_verify_payment_mints_count_entitlement() {
    let app = TestApp::new().await;

    let company_id = app.create_company(Uuid::new_v4()).await;
    let package_id = app.create_count_package(company_id, 10).await;

    let buyer = Uuid::new_v4();
    app.checkout_provider.insert(checkout_session(
        "cs_test_ok",
        "paid",
        Some("pi_test_ok"),
        package_id,
        buyer,
        company_id,
    ));

    let token = app.token(buyer, AccountRole::Member, None);
    let res = app
        .request(
            "POST",
            "/api/payments/verify",
            Some(json!({ "session_id": "cs_test_ok" })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["created"], true);
    assert_eq!(res.data()["entitlement"]["remaining_classes"], 10);
    assert_eq!(res.data()["entitlement"]["total_classes"], 10);
    assert_eq!(res.data()["entitlement"]["package_id"], json!(package_id));
    assert!(res.data()["entitlement"]["expires_at"].is_null());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_verify_payment_mints_time_entitlement() {
    let app = TestApp::new().await;

    let company_id = app.create_company(Uuid::new_v4()).await;
    let package_id = app.create_time_package(company_id, 30).await;

    let buyer = Uuid::new_v4();
    app.checkout_provider.insert(checkout_session(
        "cs_test_time",
        "paid",
        Some("pi_test_time"),
        package_id,
        buyer,
        company_id,
    ));

    let token = app.token(buyer, AccountRole::Member, None);
    let res = app
        .request(
            "POST",
            "/api/payments/verify",
            Some(json!({ "session_id": "cs_test_time" })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.data()["entitlement"]["remaining_classes"].is_null());
    assert!(res.data()["entitlement"]["expires_at"].is_string());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_verify_payment_retry_is_idempotent() {
    let app = TestApp::new().await;

    let company_id = app.create_company(Uuid::new_v4()).await;
    let package_id = app.create_count_package(company_id, 10).await;

    let buyer = Uuid::new_v4();
    app.checkout_provider.insert(checkout_session(
        "cs_test_retry",
        "paid",
        Some("pi_test_retry"),
        package_id,
        buyer,
        company_id,
    ));

    let token = app.token(buyer, AccountRole::Member, None);
    let body = json!({ "session_id": "cs_test_retry" });

    let first = app
        .request("POST", "/api/payments/verify", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["created"], true);

    let second = app
        .request("POST", "/api/payments/verify", Some(body), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.data()["created"], false);
    assert_eq!(
        second.data()["entitlement"]["id"],
        first.data()["entitlement"]["id"]
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_unpaid_session_rejected() {
    let app = TestApp::new().await;

    let company_id = app.create_company(Uuid::new_v4()).await;
    let package_id = app.create_count_package(company_id, 10).await;

    let buyer = Uuid::new_v4();
    app.checkout_provider.insert(checkout_session(
        "cs_test_unpaid",
        "unpaid",
        Some("pi_test_unpaid"),
        package_id,
        buyer,
        company_id,
    ));

    let token = app.token(buyer, AccountRole::Member, None);
    let res = app
        .request(
            "POST",
            "/api/payments/verify",
            Some(json!({ "session_id": "cs_test_unpaid" })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(res.error_code(), "INVALID_PAYMENT");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_unknown_session_rejected() {
    let app = TestApp::new().await;

    let token = app.token(Uuid::new_v4(), AccountRole::Member, None);
    let res = app
        .request(
            "POST",
            "/api/payments/verify",
            Some(json!({ "session_id": "cs_does_not_exist" })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::PAYMENT_REQUIRED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_cannot_claim_another_users_payment() {
    let app = TestApp::new().await;

    let company_id = app.create_company(Uuid::new_v4()).await;
    let package_id = app.create_count_package(company_id, 10).await;

    let buyer = Uuid::new_v4();
    app.checkout_provider.insert(checkout_session(
        "cs_test_theft",
        "paid",
        Some("pi_test_theft"),
        package_id,
        buyer,
        company_id,
    ));

    let impostor = app.token(Uuid::new_v4(), AccountRole::Member, None);
    let res = app
        .request(
            "POST",
            "/api/payments/verify",
            Some(json!({ "session_id": "cs_test_theft" })),
            Some(&impostor),
        )
        .await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_session_without_payment_intent_rejected() {
    let app = TestApp::new().await;

    let company_id = app.create_company(Uuid::new_v4()).await;
    let package_id = app.create_count_package(company_id, 10).await;

    let buyer = Uuid::new_v4();
    app.checkout_provider.insert(checkout_session(
        "cs_test_no_intent",
        "paid",
        None,
        package_id,
        buyer,
        company_id,
    ));

    let token = app.token(buyer, AccountRole::Member, None);
    let res = app
        .request(
            "POST",
            "/api/payments/verify",
            Some(json!({ "session_id": "cs_test_no_intent" })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::PAYMENT_REQUIRED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_list_entitlements_returns_only_own() {
    let app = TestApp::new().await;

    let company_id = app.create_company(Uuid::new_v4()).await;
    let package_id = app.create_count_package(company_id, 10).await;

    let member = Uuid::new_v4();
    app.create_count_entitlement(member, package_id, company_id, 5, 10)
        .await;
    app.create_count_entitlement(Uuid::new_v4(), package_id, company_id, 8, 10)
        .await;

    let token = app.token(member, AccountRole::Member, None);
    let res = app
        .request("GET", "/api/entitlements", None, Some(&token))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    let entitlements = res.data().as_array().unwrap();
    assert_eq!(entitlements.len(), 1);
    assert_eq!(entitlements[0]["remaining_classes"], 5);
}
