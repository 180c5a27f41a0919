//! Integration tests for the durable job queue: admin observability,
//! retry, claiming semantics and the built-in handlers.

use std::sync::Arc;

use http::StatusCode;
use uuid::Uuid;

use beyondtrips_core::types::JobId;
use beyondtrips_database::repositories::audit::AuditRepository;
use beyondtrips_database::repositories::job::JobRepository;
use beyondtrips_database::repositories::notification::NotificationRepository;
use beyondtrips_database::repositories::pickup::PickupRepository;
use beyondtrips_entity::job::model::CreateJob;
use beyondtrips_entity::job::status::{JobPriority, JobStatus};
use beyondtrips_worker::JobQueue;
use beyondtrips_worker::executor::JobExecutor;
use beyondtrips_worker::jobs::{AdminAuditHandler, DriverNotifyHandler, RewardCounterHandler};

use crate::helpers;
use crate::helpers::unique;

/// Onboard a driver and approve one pickup, which enqueues a
/// `driver_notify` job through the transactional outbox. Returns the
/// driver and the job ID.
async fn approved_pickup_job(app: &helpers::TestApp, admin: &str) -> (Uuid, Uuid) {
    let email = format!("{}@beyondtrips.test", unique("jobs"));
    let driver_id = app.onboard_driver(admin, "Jobs Driver", &email).await;
    let magazine_id = app
        .create_published_magazine(admin, "Jobs Edition", &unique("MAG-JOB"))
        .await;

    let driver = app.driver_token(driver_id, "Jobs Driver");
    let response = app
        .request(
            "POST",
            "/api/driver/pickups",
            Some(serde_json::json!({ "magazine_id": magazine_id, "quantity": 5 })),
            Some(&driver),
        )
        .await;
    let pickup_id = response.body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "PUT",
        &format!("/api/admin/pickups/{pickup_id}/approve"),
        None,
        Some(admin),
    )
    .await;

    let job_id: Uuid = sqlx::query_scalar(
        "SELECT id FROM jobs WHERE job_type = 'driver_notify' \
         AND payload->>'driver_id' = $1 AND payload->>'category' = 'pickup'",
    )
    .bind(driver_id.to_string())
    .fetch_one(&app.db_pool)
    .await
    .expect("approval should enqueue a notify job");

    (driver_id, job_id)
}

#[tokio::test]
async fn test_admin_can_inspect_enqueued_jobs() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (driver_id, job_id) = approved_pickup_job(&app, &admin).await;

    let response = app
        .request("GET", &format!("/api/admin/jobs/{job_id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["job_type"], "driver_notify");
    assert_eq!(response.body["data"]["queue"], "rewards");
    assert_eq!(response.body["data"]["status"], "pending");
    assert_eq!(response.body["data"]["attempts"], 0);

    // Jobs are an admin-only surface.
    let driver = app.driver_token(driver_id, "Jobs Driver");
    let response = app
        .request("GET", &format!("/api/admin/jobs/{job_id}"), None, Some(&driver))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "GET",
            &format!("/api/admin/jobs/{}", Uuid::new_v4()),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Listing filters by status; a bogus filter is a validation error.
    let response = app
        .request("GET", "/api/admin/jobs?status=pending", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert!(items.iter().all(|j| j["status"] == "pending"));

    let response = app
        .request("GET", "/api/admin/jobs?status=bogus", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_retry_applies_only_to_failed_jobs() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();
    let (_, job_id) = approved_pickup_job(&app, &admin).await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/jobs/{job_id}/retry"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "Only failed jobs can be retried; job is 'pending'"
    );

    // Simulate a job that burned through its attempts.
    sqlx::query(
        "UPDATE jobs SET status = 'failed', error_message = 'delivery timeout', \
         attempts = 5, completed_at = NOW(), updated_at = NOW() WHERE id = $1",
    )
    .bind(job_id)
    .execute(&app.db_pool)
    .await
    .unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/admin/jobs/{job_id}/retry"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["message"], "Job requeued");

    let (status, attempts, error_message): (String, i32, Option<String>) = sqlx::query_as(
        "SELECT status::TEXT, attempts, error_message FROM jobs WHERE id = $1",
    )
    .bind(job_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(status, "pending");
    assert_eq!(attempts, 0);
    assert!(error_message.is_none());
}

#[tokio::test]
async fn test_handlers_deliver_the_reward_side_effects() {
    let app = helpers::TestApp::new().await;
    let admin = app.admin_token();

    let email = format!("{}@beyondtrips.test", unique("deliver"));
    let driver_id = app.onboard_driver(&admin, "Deliver Driver", &email).await;
    let barcode = unique("MAG-DL");
    let magazine_id = app
        .create_published_magazine(&admin, "Deliver Edition", &barcode)
        .await;
    let pickup_id = app
        .run_pickup_to_active(&admin, driver_id, magazine_id, &barcode)
        .await;

    let response = app
        .request(
            "POST",
            "/api/public/rider/submit-review",
            Some(serde_json::json!({
                "barcode": barcode,
                "rating": 5,
                "rater_name": "Delivery Rider",
                "device_fingerprint": unique("fp-dl"),
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let rating_id: Uuid = response.body["rating"]["id"].as_str().unwrap().parse().unwrap();

    // Run the three follow-up jobs the dispatch enqueued, the way the
    // worker would.
    let job_repo = Arc::new(JobRepository::new(app.db_pool.clone()));
    let mut executor = JobExecutor::new();
    executor.register(Arc::new(RewardCounterHandler::new(Arc::new(
        PickupRepository::new(app.db_pool.clone()),
    ))));
    executor.register(Arc::new(DriverNotifyHandler::new(Arc::new(
        NotificationRepository::new(app.db_pool.clone()),
    ))));
    executor.register(Arc::new(AdminAuditHandler::new(Arc::new(
        AuditRepository::new(app.db_pool.clone()),
    ))));

    let job_ids: Vec<Uuid> = sqlx::query_scalar(
        "SELECT id FROM jobs WHERE status = 'pending' AND ( \
            (job_type = 'reward_counters' AND payload->>'pickup_id' = $1) \
            OR (job_type = 'driver_notify' AND payload->>'driver_id' = $2 \
                AND payload->>'category' = 'reward') \
            OR (job_type = 'admin_audit' AND payload->'details'->>'rating_id' = $3) \
         )",
    )
    .bind(pickup_id.to_string())
    .bind(driver_id.to_string())
    .bind(rating_id.to_string())
    .fetch_all(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(job_ids.len(), 3);

    for id in job_ids {
        let job = job_repo
            .find_by_id(JobId::from_uuid(id))
            .await
            .unwrap()
            .expect("job should exist");
        executor.execute(&job).await.expect("handler should succeed");
    }

    // Counter bump landed on the pickup.
    let driver = app.driver_token(driver_id, "Deliver Driver");
    let response = app
        .request(
            "GET",
            &format!("/api/driver/pickups/{pickup_id}"),
            None,
            Some(&driver),
        )
        .await;
    assert_eq!(response.body["data"]["rider_scans"], 1);
    assert_eq!(response.body["data"]["btl_coins_earned"], 1);

    // The coin notification reached the driver's inbox.
    let response = app
        .request("GET", "/api/driver/notifications", None, Some(&driver))
        .await;
    let items = response.body["data"]["items"].as_array().unwrap();
    assert!(items
        .iter()
        .any(|n| n["title"] == "BTL Coin Earned!" && n["category"] == "reward"));

    // The audit trail recorded the award.
    let audits: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM audit_events WHERE event_type = 'btl_coin.awarded' \
         AND payload->>'rating_id' = $1",
    )
    .bind(rating_id.to_string())
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(audits, 1);
}

#[tokio::test]
async fn test_queue_claims_by_priority_and_backs_off() {
    let app = helpers::TestApp::new().await;
    let repo = Arc::new(JobRepository::new(app.db_pool.clone()));
    // A queue name no other test touches.
    let queue_name = unique("itest-queue");
    let queue = JobQueue::new(Arc::clone(&repo), "worker-itest".to_string(), 60);

    let normal = repo
        .enqueue(&CreateJob {
            job_type: "itest_noop".to_string(),
            queue: queue_name.clone(),
            priority: JobPriority::Normal,
            payload: serde_json::json!({ "n": 1 }),
            max_attempts: 5,
            scheduled_at: None,
        })
        .await
        .unwrap();
    let high = repo
        .enqueue(&CreateJob {
            job_type: "itest_noop".to_string(),
            queue: queue_name.clone(),
            priority: JobPriority::High,
            payload: serde_json::json!({ "n": 2 }),
            max_attempts: 5,
            scheduled_at: None,
        })
        .await
        .unwrap();

    // The high-priority job is claimed first even though it is younger.
    let claimed = queue
        .dequeue(&[queue_name.as_str()])
        .await
        .unwrap()
        .expect("a job should be claimable");
    assert_eq!(claimed.id, high.id);
    assert_eq!(claimed.status, JobStatus::Running);
    assert_eq!(claimed.attempts, 1);
    assert_eq!(claimed.worker_id.as_deref(), Some("worker-itest"));

    // Backing off reschedules it into the future, so the next claim
    // takes the remaining job.
    queue.retry_later(&claimed, "downstream unavailable").await.unwrap();
    let (status, future): (String, bool) = sqlx::query_as(
        "SELECT status::TEXT, scheduled_at > NOW() FROM jobs WHERE id = $1",
    )
    .bind(high.id.into_uuid())
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(status, "pending");
    assert!(future);

    let claimed = queue
        .dequeue(&[queue_name.as_str()])
        .await
        .unwrap()
        .expect("the normal job should be claimable");
    assert_eq!(claimed.id, normal.id);
    queue.complete(claimed.id).await.unwrap();

    // Nothing left that is due now.
    assert!(queue.dequeue(&[queue_name.as_str()]).await.unwrap().is_none());

    let completed = repo.find_by_id(normal.id).await.unwrap().unwrap();
    assert_eq!(completed.status, JobStatus::Completed);
    assert!(completed.completed_at.is_some());
}
