//! Integration tests for the authenticated driver surface.

use http::StatusCode;

use crate::helpers;
use crate::helpers::unique;

#[tokio::test]
async fn test_profile_returns_the_token_subject() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let email = format!("{}@beyondtrips.test", unique("profile"));
    let driver_id = app.onboard_driver(&admin, "Profile Driver", &email).await;
    let driver = app.driver_token(driver_id, "Profile Driver");

    let response = app
        .request("GET", "/api/driver/profile", None, Some(&driver))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["id"], driver_id.to_string().as_str());
    assert_eq!(response.body["data"]["full_name"], "Profile Driver");
    assert_eq!(response.body["data"]["email"], email.as_str());
}

#[tokio::test]
async fn test_profile_requires_a_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/driver/profile", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/driver/profile", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_unknown_subject_not_found() {
    let app = helpers::TestApp::new().await;
    // Valid token for a driver that was never onboarded.
    let driver = app.driver_token(uuid::Uuid::new_v4(), "Ghost Driver");

    let response = app
        .request("GET", "/api/driver/profile", None, Some(&driver))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pickup_listing_is_scoped_to_the_driver() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();

    let email_a = format!("{}@beyondtrips.test", unique("lista"));
    let email_b = format!("{}@beyondtrips.test", unique("listb"));
    let driver_a = app.onboard_driver(&admin, "List Driver A", &email_a).await;
    let driver_b = app.onboard_driver(&admin, "List Driver B", &email_b).await;
    let magazine_id = app
        .create_published_magazine(&admin, "Scoped Edition", &unique("MAG-SC"))
        .await;

    let token_a = app.driver_token(driver_a, "List Driver A");
    app.request(
        "POST",
        "/api/driver/pickups",
        Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 5 })),
        Some(&token_a),
    )
    .await;

    let response = app
        .request("GET", "/api/driver/pickups", None, Some(&token_a))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 1);

    let token_b = app.driver_token(driver_b, "List Driver B");
    let response = app
        .request("GET", "/api/driver/pickups", None, Some(&token_b))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_notification_read_flow() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let email = format!("{}@beyondtrips.test", unique("inbox"));
    let driver_id = app.onboard_driver(&admin, "Inbox Driver", &email).await;
    let driver = app.driver_token(driver_id, "Inbox Driver");

    // Onboarding seeds the welcome notification.
    let response = app
        .request(
            "GET",
            "/api/driver/notifications/unread-count",
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.body["data"]["count"], 1);

    let response = app
        .request("GET", "/api/driver/notifications", None, Some(&driver))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Welcome to Beyond Trips");
    assert_eq!(items[0]["category"], "system");
    assert_eq!(items[0]["is_read"], false);
    let notification_id = items[0]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/driver/notifications/{notification_id}/read"),
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            "/api/driver/notifications/unread-count",
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.body["data"]["count"], 0);

    // Marking twice reads as not found.
    let response = app
        .request(
            "PUT",
            &format!("/api/driver/notifications/{notification_id}/read"),
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_all_read_reports_how_many_changed() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let email = format!("{}@beyondtrips.test", unique("markall"));
    let driver_id = app.onboard_driver(&admin, "Mark All Driver", &email).await;
    let driver = app.driver_token(driver_id, "Mark All Driver");

    let response = app
        .request(
            "PUT",
            "/api/driver/notifications/read-all",
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    // Only the welcome notification was unread.
    assert_eq!(response.body["data"]["marked"], 1);

    let response = app
        .request(
            "PUT",
            "/api/driver/notifications/read-all",
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.body["data"]["marked"], 0);
}

#[tokio::test]
async fn test_notifications_are_private_to_their_driver() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let email_a = format!("{}@beyondtrips.test", unique("priva"));
    let email_b = format!("{}@beyondtrips.test", unique("privb"));
    let driver_a = app.onboard_driver(&admin, "Private A", &email_a).await;
    let driver_b = app.onboard_driver(&admin, "Private B", &email_b).await;

    let token_a = app.driver_token(driver_a, "Private A");
    let response = app
        .request("GET", "/api/driver/notifications", None, Some(&token_a))
        .await;
    let notification_id = response.body["data"]["items"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Another driver cannot mark it read, and learns nothing from trying.
    let token_b = app.driver_token(driver_b, "Private B");
    let response = app
        .request(
            "PUT",
            &format!("/api/driver/notifications/{notification_id}/read"),
            None,
            Some(&token_b),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
