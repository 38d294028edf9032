//! Integration tests for company and package endpoints.

mod common;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::TestApp;
use fitbook_entity::account::AccountRole;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_register_company() {
    let app = TestApp::new().await;

    let owner = Uuid::new_v4();
    let token = app.token(owner, AccountRole::Company, None);

    let res = app
        .request(
            "POST",
            "/api/companies",
            Some(json!({
                "company_name": "Flow Studio",
                "contact_email": "hello@flow.example",
                "description": "Yoga and pilates",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["company_name"], "Flow Studio");
    // New registrations start unapproved.
    assert_eq!(res.data()["is_approved"], false);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_register_company_twice_conflicts() {
    let app = TestApp::new().await;

    let owner = Uuid::new_v4();
    let token = app.token(owner, AccountRole::Company, None);
    let body = json!({
        "company_name": "Flow Studio",
        "contact_email": "hello@flow.example",
    });

    let res = app
        .request("POST", "/api/companies", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .request("POST", "/api/companies", Some(body), Some(&token))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_register_company_rejects_bad_email() {
    let app = TestApp::new().await;

    let token = app.token(Uuid::new_v4(), AccountRole::Company, None);
    let res = app
        .request(
            "POST",
            "/api/companies",
            Some(json!({
                "company_name": "Flow Studio",
                "contact_email": "not-an-email",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_public_company_profile() {
    let app = TestApp::new().await;

    let company_id = app.create_company(Uuid::new_v4()).await;

    let res = app
        .request("GET", &format!("/api/companies/{company_id}"), None, None)
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["id"], json!(company_id));
    // The owner's user ID is not exposed publicly.
    assert!(res.data().get("user_id").is_none());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_update_own_company() {
    let app = TestApp::new().await;

    let owner = Uuid::new_v4();
    let company_id = app.create_company(owner).await;
    let token = app.token(owner, AccountRole::Company, Some(company_id));

    let res = app
        .request(
            "PUT",
            "/api/companies/me",
            Some(json!({ "description": "Now with reformer pilates" })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["description"], "Now with reformer pilates");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_create_package_kind_field_validation() {
    let app = TestApp::new().await;

    let owner = Uuid::new_v4();
    let company_id = app.create_company(owner).await;
    let token = app.token(owner, AccountRole::Company, Some(company_id));

    // class_count kind without a class_count is invalid.
    let res = app
        .request(
            "POST",
            "/api/packages",
            Some(json!({
                "name": "Broken Pack",
                "kind": "class_count",
                "price_cents": 5000,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .request(
            "POST",
            "/api/packages",
            Some(json!({
                "name": "Ten Pack",
                "kind": "class_count",
                "class_count": 10,
                "price_cents": 5000,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["kind"], "class_count");
    assert_eq!(res.data()["class_count"], 10);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_member_cannot_create_package() {
    let app = TestApp::new().await;

    let token = app.token(Uuid::new_v4(), AccountRole::Member, None);
    let res = app
        .request(
            "POST",
            "/api/packages",
            Some(json!({
                "name": "Ten Pack",
                "kind": "class_count",
                "class_count": 10,
                "price_cents": 5000,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_public_package_list_shows_active_only() {
    let app = TestApp::new().await;

    let owner = Uuid::new_v4();
    let company_id = app.create_company(owner).await;
    let active_id = app.create_count_package(company_id, 10).await;
    let retired_id = app.create_count_package(company_id, 5).await;

    let token = app.token(owner, AccountRole::Company, Some(company_id));
    let res = app
        .request(
            "POST",
            &format!("/api/packages/{retired_id}/deactivate"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    // Anonymous browsing sees only purchasable packages.
    let res = app
        .request(
            "GET",
            &format!("/api/companies/{company_id}/packages"),
            None,
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let packages = res.data().as_array().unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0]["id"], json!(active_id));

    // The owner sees the full catalog.
    let res = app
        .request(
            "GET",
            &format!("/api/companies/{company_id}/packages"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data().as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_update_package_price_but_not_kind() {
    let app = TestApp::new().await;

    let owner = Uuid::new_v4();
    let company_id = app.create_company(owner).await;
    let package_id = app.create_count_package(company_id, 10).await;
    let token = app.token(owner, AccountRole::Company, Some(company_id));

    let res = app
        .request(
            "PUT",
            &format!("/api/packages/{package_id}"),
            Some(json!({ "price_cents": 12900 })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["price_cents"], 12900);
    assert_eq!(res.data()["kind"], "class_count");
    assert_eq!(res.data()["class_count"], 10);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let res = app.request("GET", "/api/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["status"], "ok");

    let res = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["database"], "connected");
}
