//! Integration tests for the anonymous rider scan and review flow.

use std::sync::Arc;

use http::StatusCode;
use uuid::Uuid;

use beyondtrips_database::repositories::{earning, job, rating, reward};
use beyondtrips_entity::pickup::model::MagazinePickup;
use beyondtrips_entity::rating::model::DriverRating;
use beyondtrips_service::{DispatchOutcome, RewardDispatcher};

use crate::helpers;
use crate::helpers::unique;

/// Driver with an active magazine copy out in the field.
struct FieldCopy {
    driver_id: Uuid,
    pickup_id: Uuid,
    barcode: String,
}

/// Onboard a driver, publish a magazine and walk a pickup to active.
async fn setup(app: &helpers::TestApp, admin: &str) -> FieldCopy {
    let email = format!("{}@beyondtrips.test", unique("rider"));
    let driver_id = app.onboard_driver(admin, "Review Driver", &email).await;
    let barcode = unique("MAG-RV");
    let magazine_id = app
        .create_published_magazine(admin, "Review Edition", &barcode)
        .await;
    let pickup_id = app
        .run_pickup_to_active(admin, driver_id, magazine_id, &barcode)
        .await;
    FieldCopy {
        driver_id,
        pickup_id,
        barcode,
    }
}

#[tokio::test]
async fn test_scan_resolves_magazine_driver_and_pickup() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;

    let response = app
        .request(
            "POST",
            "/api/public/rider/scan-magazine",
            Some(serde_json::json!({ "barcode": copy.barcode })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["magazine"]["barcode"], copy.barcode.as_str());
    assert_eq!(response.body["data"]["driver"]["full_name"], "Review Driver");
    assert_eq!(
        response.body["data"]["pickup_id"],
        copy.pickup_id.to_string().as_str()
    );
    // Riders never see the driver's contact details.
    assert!(response.body["data"]["driver"].get("email").is_none());
    assert!(response.body["data"]["driver"].get("phone").is_none());
}

#[tokio::test]
async fn test_scan_unknown_barcode_not_found() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/public/rider/scan-magazine",
            Some(serde_json::json!({ "barcode": unique("NOPE") })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Magazine not found");
}

#[tokio::test]
async fn test_scan_draft_magazine_not_found() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let barcode = unique("MAG-DR");

    // Created but never published; riders must not resolve it.
    app.request(
        "POST",
        "/api/admin/magazines",
        Some(serde_json::json!({
            "title": "Hidden Draft",
            "edition": "Q2 2027",
            "barcode": barcode,
        })),
        Some(&admin),
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/public/rider/scan-magazine",
            Some(serde_json::json!({ "barcode": barcode })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scan_requires_active_field_copy() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let barcode = unique("MAG-NF");

    // Published, but no pickup has placed it with any driver.
    app.create_published_magazine(&admin, "Shelf Edition", &barcode)
        .await;

    let response = app
        .request(
            "POST",
            "/api/public/rider/scan-magazine",
            Some(serde_json::json!({ "barcode": barcode })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Magazine not activated");
}

#[tokio::test]
async fn test_scan_cooldown_is_per_device() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;
    let fp_a = unique("fp-a");
    let fp_b = unique("fp-b");

    let response = app
        .request(
            "POST",
            "/api/public/rider/scan-magazine",
            Some(serde_json::json!({ "barcode": copy.barcode, "device_fingerprint": fp_a })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Same device inside the cool-down window.
    let response = app
        .request(
            "POST",
            "/api/public/rider/scan-magazine",
            Some(serde_json::json!({ "barcode": copy.barcode, "device_fingerprint": fp_a })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.body["message"],
        "Please wait before scanning this magazine again"
    );

    // A different device is unaffected.
    let response = app
        .request(
            "POST",
            "/api/public/rider/scan-magazine",
            Some(serde_json::json!({ "barcode": copy.barcode, "device_fingerprint": fp_b })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Without a fingerprint there is nothing to key the cool-down on.
    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                "/api/public/rider/scan-magazine",
                Some(serde_json::json!({ "barcode": copy.barcode })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_review_awards_the_full_coin_package() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 5,
                "review": "Clean car, great conversation",
                "rater_name": "Chidi Okeke",
                "rater_email": format!("{}@riders.test", unique("chidi")),
                "device_fingerprint": unique("fp-pkg"),
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["rating"]["rating"], 5);
    assert_eq!(response.body["rating"]["btl_coin_awarded"], true);
    let rating_id: Uuid = response.body["rating"]["id"].as_str().unwrap().parse().unwrap();

    // The rating row carries the awarded flag.
    let flagged: bool =
        sqlx::query_scalar("SELECT btl_coin_awarded FROM driver_ratings WHERE id = $1")
            .bind(rating_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert!(flagged);

    // The award is processed and linked to a ledger entry.
    let (award_status, amount, earning_id): (String, i32, Option<Uuid>) = sqlx::query_as(
        "SELECT status::TEXT, amount, earning_id FROM btl_coin_awards WHERE rating_id = $1",
    )
    .bind(rating_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(award_status, "processed");
    assert_eq!(amount, 1);
    let earning_id = earning_id.expect("award should link its ledger entry");

    // The ledger entry values one coin at the configured Naira rate.
    let (scans, points, amount_ngn, entry_type, source, status): (
        i32,
        i32,
        i64,
        String,
        String,
        String,
    ) = sqlx::query_as(
        "SELECT scans, points, amount_ngn, entry_type, source, status \
         FROM driver_earnings WHERE id = $1",
    )
    .bind(earning_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(scans, 1);
    assert_eq!(points, 1);
    assert_eq!(amount_ngn, 500);
    assert_eq!(entry_type, "bonus");
    assert_eq!(source, "btl_coin");
    assert_eq!(status, "completed");

    // Three follow-up jobs were committed with the award.
    let counter_jobs: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM jobs WHERE job_type = 'reward_counters' \
         AND status = 'pending' AND payload->>'pickup_id' = $1",
    )
    .bind(copy.pickup_id.to_string())
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(counter_jobs, 1);

    let notify_jobs: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM jobs WHERE job_type = 'driver_notify' \
         AND status = 'pending' AND payload->>'driver_id' = $1 \
         AND payload->>'category' = 'reward'",
    )
    .bind(copy.driver_id.to_string())
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(notify_jobs, 1);

    let audit_jobs: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM jobs WHERE job_type = 'admin_audit' \
         AND status = 'pending' AND payload->'details'->>'rating_id' = $1",
    )
    .bind(rating_id.to_string())
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(audit_jobs, 1);

    // The driver sees the coin and the earnings totals.
    let driver = app.driver_token(copy.driver_id, "Review Driver");
    let response = app
        .request("GET", "/api/driver/btl-coins", None, Some(&driver))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["status"], "processed");
    assert_eq!(items[0]["amount"], 1);

    let response = app
        .request("GET", "/api/driver/earnings", None, Some(&driver))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["totals"]["total_points"], 1);
    assert_eq!(response.body["data"]["totals"]["total_amount_ngn"], 500);
    let entries = response.body["data"]["entries"]["items"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["entry_type"], "bonus");
}

#[tokio::test]
async fn test_duplicate_review_from_same_device_conflicts() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;
    let fingerprint = unique("fp-dup");

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 4,
                "rater_name": "First Rider",
                "device_fingerprint": fingerprint,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // Same device again, even under a different name.
    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 1,
                "rater_name": "Second Rider",
                "device_fingerprint": fingerprint,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "A review for this magazine has already been submitted"
    );

    let awards: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM btl_coin_awards WHERE driver_id = $1")
        .bind(copy.driver_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(awards, 1);
}

#[tokio::test]
async fn test_duplicate_detection_keys_on_strongest_identifier_only() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;
    let email = format!("{}@riders.test", unique("axis"));

    // First submission keys on the device fingerprint.
    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 5,
                "rater_name": "Axis Rider",
                "rater_email": email,
                "device_fingerprint": unique("fp-axis"),
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The same email without a fingerprint keys on the email instead,
    // so it does not collide with the first submission.
    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 5,
                "rater_name": "Axis Rider",
                "rater_email": email,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["rating"]["btl_coin_awarded"], true);

    let awards: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM btl_coin_awards WHERE driver_id = $1")
        .bind(copy.driver_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(awards, 2);
}

#[tokio::test]
async fn test_duplicate_email_is_case_insensitive() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;
    let local = unique("case");

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 5,
                "rater_name": "Case Rider",
                "rater_email": format!("{}@Riders.TEST", local),
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 3,
                "rater_name": "Case Rider",
                "rater_email": format!("{}@riders.test", local),
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_duplicate_name_trims_and_lowercases() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;
    let name = unique("Ngozi");

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 4,
                "rater_name": format!("  {}  ", name),
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 4,
                "rater_name": name.to_lowercase(),
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_duplicate_phone_fallback() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;
    let phone = format!("+2348{}", &Uuid::new_v4().simple().to_string()[..9]);

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 5,
                "rater_name": "Phone Rider",
                "rater_phone": phone,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 2,
                "rater_name": "Different Name",
                "rater_phone": phone,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_review_validation() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 6,
                "rater_name": "Too Generous",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 3,
                "rater_name": "",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_does_not_require_a_prior_scan() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;

    // Straight to submit; the scan endpoint was never called.
    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 5,
                "rater_name": "Direct Rider",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["rating"]["btl_coin_awarded"], true);
}

#[tokio::test]
async fn test_redispatch_for_the_same_rating_writes_nothing() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let copy = setup(&app, &admin).await;

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": copy.barcode,
                "rating": 4,
                "rater_name": "Repeat Rider",
                "device_fingerprint": unique("fp-redo"),
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let rating_id: Uuid = response.body["rating"]["id"].as_str().unwrap().parse().unwrap();

    let stored: DriverRating = sqlx::query_as("SELECT * FROM driver_ratings WHERE id = $1")
        .bind(rating_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    let pickup: MagazinePickup = sqlx::query_as("SELECT * FROM magazine_pickups WHERE id = $1")
        .bind(copy.pickup_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();

    // Dispatch again, exactly as a stale retry would.
    let dispatcher = RewardDispatcher::new(
        app.db_pool.clone(),
        Arc::new(reward::AwardRepository::new(app.db_pool.clone())),
        Arc::new(earning::EarningRepository::new(app.db_pool.clone())),
        Arc::new(rating::RatingRepository::new(app.db_pool.clone())),
        Arc::new(job::JobRepository::new(app.db_pool.clone())),
        app.config.rewards.coin_value_ngn,
        app.config.worker.max_attempts,
    );
    let outcome = dispatcher.dispatch(&stored, &pickup).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::AlreadyAwarded);

    // Still exactly one award and one ledger row.
    let awards: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM btl_coin_awards WHERE rating_id = $1")
            .bind(rating_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(awards, 1);
    let earnings: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM driver_earnings WHERE driver_id = $1")
            .bind(copy.driver_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(earnings, 1);
}
