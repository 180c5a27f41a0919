//! Integration tests for the magazine pickup state machine.

use http::StatusCode;

use crate::helpers;
use crate::helpers::unique;

/// Onboard a driver and publish a magazine for pickup scenarios.
async fn setup(app: &helpers::TestApp, admin: &str) -> (uuid::Uuid, uuid::Uuid, String) {
    let email = format!("{}@beyondtrips.test", unique("pickup"));
    let driver_id = app.onboard_driver(admin, "Pickup Driver", &email).await;
    let barcode = unique("MAG-PU");
    let magazine_id = app
        .create_published_magazine(admin, "Pickup Edition", &barcode)
        .await;
    (driver_id, magazine_id, barcode)
}

#[tokio::test]
async fn test_full_pickup_lifecycle() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (driver_id, magazine_id, barcode) = setup(&app, &admin).await;
    let driver = app.driver_token(driver_id, "Pickup Driver");

    // Driver requests copies.
    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({
                "magazine_id": magazine_id,
                "quantity": 25,
            })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "requested");
    assert!(response.body["data"]["qr_code"].is_null());
    let pickup_id = response.body["data"]["id"].as_str().unwrap().to_string();

    // Admin approves; codes and the return window are issued here.
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{pickup_id}/approve"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "approved");
    let qr = response.body["data"]["qr_code"].as_str().unwrap();
    assert!(qr.starts_with("BT-PICKUP-"));
    let code = response.body["data"]["verification_code"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(code.len(), 6);
    assert!(!response.body["data"]["return_due_at"].is_null());

    // Wrong verification code is rejected without moving the state.
    let response = app
        .request(
            "PUT",
            &format!("/api/driver/pickups/{pickup_id}/confirm"),
            Some(serde_json::json!({ "verification_code": "000000x" })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid verification code");

    let response = app
        .request(
            "PUT",
            &format!("/api/driver/pickups/{pickup_id}/confirm"),
            Some(serde_json::json!({ "verification_code": code })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "picked_up");
    assert!(!response.body["data"]["picked_up_at"].is_null());

    // Activation must quote the assigned magazine's barcode.
    let response = app
        .request(
            "PUT",
            &format!("/api/driver/pickups/{pickup_id}/activate"),
            Some(serde_json::json!({ "barcode": "WRONG-BARCODE" })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            &format!("/api/driver/pickups/{pickup_id}/activate"),
            Some(serde_json::json!({ "barcode": barcode })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "active");
    assert_eq!(response.body["data"]["activation_barcode"], barcode.as_str());

    // Driver returns the copies.
    let response = app
        .request(
            "PUT",
            &format!("/api/driver/pickups/{pickup_id}/return"),
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "returned");
    assert!(!response.body["data"]["actual_return_at"].is_null());
}

#[tokio::test]
async fn test_approve_is_not_repeatable() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (driver_id, magazine_id, _) = setup(&app, &admin).await;
    let driver = app.driver_token(driver_id, "Pickup Driver");

    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 10 })),
            Some(&driver),
        )
        .await;
    let pickup_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{pickup_id}/approve"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let first_code = response.body["data"]["verification_code"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{pickup_id}/approve"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // The original codes survive the failed second approval.
    let response = app
        .request(
            "GET",
            &format!("/api/driver/pickups/{pickup_id}"),
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.body["data"]["verification_code"], first_code.as_str());
}

#[tokio::test]
async fn test_reject_from_requested_and_approved() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (driver_id, magazine_id, _) = setup(&app, &admin).await;
    let driver = app.driver_token(driver_id, "Pickup Driver");

    // Reject straight from requested.
    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 5 })),
            Some(&driver),
        )
        .await;
    let first = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{first}/reject"),
            Some(serde_json::json!({ "reason": "Out of stock" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "rejected");
    assert_eq!(response.body["data"]["rejection_reason"], "Out of stock");

    // Reject after approval (driver never collected).
    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 5 })),
            Some(&driver),
        )
        .await;
    let second = response.body["data"]["id"].as_str().unwrap().to_string();
    app.request(
        "PUT",
        &format!("/api/admin/pickups/{second}/approve"),
        None,
        Some(&admin),
    )
    .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{second}/reject"),
            Some(serde_json::json!({ "reason": "Never collected" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "rejected");

    // A rejected pickup cannot be rejected again.
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{second}/reject"),
            Some(serde_json::json!({ "reason": "Again" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_request_requires_published_magazine() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let email = format!("{}@beyondtrips.test", unique("draftreq"));
    let driver_id = app.onboard_driver(&admin, "Draft Driver", &email).await;
    let driver = app.driver_token(driver_id, "Draft Driver");

    // Draft magazine: created but never published.
    let response = app
        .request(
            "POST",
            "/api/admin/magazines",
            Some(serde_json::json!({
                "title": "Unpublished",
                "edition": "Q1 2027",
                "barcode": unique("MAG-DRAFT"),
            })),
            Some(&admin),
        )
        .await;
    let draft_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({ "magazine_id": draft_id, "quantity": 5 })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Magazine is not published");

    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({
                "magazine_id": uuid::Uuid::new_v4(),
                "quantity": 5,
            })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suspended_driver_cannot_request() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (driver_id, magazine_id, _) = setup(&app, &admin).await;
    let driver = app.driver_token(driver_id, "Pickup Driver");

    sqlx::query("UPDATE drivers SET status = 'suspended', updated_at = NOW() WHERE id = $1")
        .bind(driver_id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 5 })),
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Driver account is suspended");
}

#[tokio::test]
async fn test_pickup_is_private_to_its_driver() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (driver_id, magazine_id, _) = setup(&app, &admin).await;
    let owner = app.driver_token(driver_id, "Owner");

    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 5 })),
            Some(&owner),
        )
        .await;
    let pickup_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let other_email = format!("{}@beyondtrips.test", unique("other"));
    let other_id = app.onboard_driver(&admin, "Other Driver", &other_email).await;
    let other = app.driver_token(other_id, "Other Driver");

    let response = app
        .request(
            "GET",
            &format!("/api/driver/pickups/{pickup_id}"),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/api/driver/pickups/{pickup_id}/confirm"),
            Some(serde_json::json!({ "verification_code": "123456" })),
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mark_lost_and_damaged_require_active() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (driver_id, magazine_id, barcode) = setup(&app, &admin).await;
    let driver = app.driver_token(driver_id, "Pickup Driver");

    // Damaged straight from requested is not a declared edge.
    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 5 })),
            Some(&driver),
        )
        .await;
    let requested = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{requested}/damaged"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // Lost from active works.
    let lost_pickup = app
        .run_pickup_to_active(&admin, driver_id, magazine_id, &barcode)
        .await;
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{lost_pickup}/lost"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "lost");

    // Damaged from active works.
    let damaged_pickup = app
        .run_pickup_to_active(&admin, driver_id, magazine_id, &barcode)
        .await;
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/pickups/{damaged_pickup}/damaged"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "damaged");
}

#[tokio::test]
async fn test_admin_listing_filters_by_status() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (driver_id, magazine_id, _) = setup(&app, &admin).await;
    let driver = app.driver_token(driver_id, "Pickup Driver");

    app.request(
        "POST",
        "/api/driver/pickups",
        Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 5 })),
        Some(&driver),
    )
    .await;

    let response = app
        .request(
            "GET",
            "/api/admin/pickups?status=requested",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|p| p["status"] == "requested"));

    let response = app
        .request(
            "GET",
            "/api/admin/pickups?status=not-a-status",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
