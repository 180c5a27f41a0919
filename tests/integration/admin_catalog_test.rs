//! Integration tests for admin driver onboarding and magazine management.

use http::StatusCode;

use crate::helpers;
use crate::helpers::unique;

#[tokio::test]
async fn test_onboard_driver_creates_account_and_welcome_notification() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let email = format!("{}@beyondtrips.test", unique("ada"));

    let response = app
        .request(
            "POST",
            "/api/admin/drivers",
            Some(serde_json::json!({
                "full_name": "Ada Obi",
                "email": email,
                "phone": "+2348012345678",
            })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["full_name"], "Ada Obi");
    assert_eq!(response.body["data"]["email"], email.as_str());
    assert_eq!(response.body["data"]["status"], "active");

    let driver_id: uuid::Uuid = response.body["data"]["id"].as_str().unwrap().parse().unwrap();

    // The welcome notification lands in the same transaction.
    let driver = app.driver_token(driver_id, "Ada Obi");
    let response = app
        .request(
            "GET",
            "/api/driver/notifications/unread-count",
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"], 1);
}

#[tokio::test]
async fn test_onboard_driver_duplicate_email_conflicts() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let email = format!("{}@beyondtrips.test", unique("dup"));

    app.onboard_driver(&admin, "First Driver", &email).await;

    let response = app
        .request(
            "POST",
            "/api/admin/drivers",
            Some(serde_json::json!({
                "full_name": "Second Driver",
                "email": email,
            })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_onboard_driver_rejects_invalid_email() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();

    let response = app
        .request(
            "POST",
            "/api/admin/drivers",
            Some(serde_json::json!({
                "full_name": "Bad Email",
                "email": "not-an-email",
            })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let app = helpers::TestApp::new().await;
    let driver = app.driver_token(uuid::Uuid::new_v4(), "Not An Admin");

    let response = app
        .request(
            "POST",
            "/api/admin/drivers",
            Some(serde_json::json!({
                "full_name": "Someone",
                "email": format!("{}@beyondtrips.test", unique("someone")),
            })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", "/api/admin/drivers", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_magazine_publish_lifecycle() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let barcode = unique("MAG-LIFE");

    let response = app
        .request(
            "POST",
            "/api/admin/magazines",
            Some(serde_json::json!({
                "title": "City Pulse",
                "edition": "Q3 2026",
                "barcode": barcode,
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "draft");
    assert!(response.body["data"]["published_at"].is_null());
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/magazines/{id}/publish"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "published");
    assert!(!response.body["data"]["published_at"].is_null());

    // Publishing is a one-way edge; a second publish conflicts.
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/magazines/{id}/publish"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_magazine_duplicate_barcode_conflicts() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let barcode = unique("MAG-DUP");

    app.create_published_magazine(&admin, "First", &barcode).await;

    let response = app
        .request(
            "POST",
            "/api/admin/magazines",
            Some(serde_json::json!({
                "title": "Second",
                "edition": "Q4 2026",
                "barcode": barcode,
            })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_drivers_paginates() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();

    for i in 0..3 {
        let email = format!("{}@beyondtrips.test", unique(&format!("page{i}")));
        app.onboard_driver(&admin, &format!("Page Driver {i}"), &email)
            .await;
    }

    let response = app
        .request(
            "GET",
            "/api/admin/drivers?page=1&per_page=2",
            None,
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(response.body["data"]["per_page"], 2);
    assert!(response.body["data"]["total_items"].as_u64().unwrap() >= 3);
    assert!(response.body["data"]["total_pages"].as_u64().unwrap() >= 2);
}
