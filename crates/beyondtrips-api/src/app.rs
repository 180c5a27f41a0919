//! Application bootstrap: wires repositories, services, the background
//! worker and the HTTP server together.

use std::sync::Arc;

use tokio::sync::watch;

use beyondtrips_core::config::AppConfig;
use beyondtrips_core::error::AppError;
use beyondtrips_database::DatabasePool;
use beyondtrips_database::repositories::{
    audit, driver, earning, job, magazine, notification, pickup, rating, reward, scan,
};
use beyondtrips_service::{
    DriverService, EarningService, MagazineService, NotificationService, PickupService,
    RewardDispatcher, ReviewService,
};
use beyondtrips_worker::jobs::{
    AdminAuditHandler, DriverNotifyHandler, JobPruneHandler, OverduePickupSweepHandler,
    RewardCounterHandler, ScanEventPruneHandler,
};
use beyondtrips_worker::{CronScheduler, JobQueue, WorkerRunner};

use crate::router::build_router;
use crate::state::AppState;

/// Runs the Beyond Trips server with the given configuration and
/// database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting Beyond Trips server...");
    let pool = db.pool().clone();

    // ── Step 1: Initialize repositories ──────────────────────────
    let driver_repo = Arc::new(driver::DriverRepository::new(pool.clone()));
    let magazine_repo = Arc::new(magazine::MagazineRepository::new(pool.clone()));
    let pickup_repo = Arc::new(pickup::PickupRepository::new(pool.clone()));
    let rating_repo = Arc::new(rating::RatingRepository::new(pool.clone()));
    let award_repo = Arc::new(reward::AwardRepository::new(pool.clone()));
    let earning_repo = Arc::new(earning::EarningRepository::new(pool.clone()));
    let scan_repo = Arc::new(scan::ScanRepository::new(pool.clone()));
    let notification_repo = Arc::new(notification::NotificationRepository::new(pool.clone()));
    let audit_repo = Arc::new(audit::AuditRepository::new(pool.clone()));
    let job_repo = Arc::new(job::JobRepository::new(pool.clone()));

    // ── Step 2: Initialize services ──────────────────────────────
    let dispatcher = Arc::new(RewardDispatcher::new(
        pool.clone(),
        Arc::clone(&award_repo),
        Arc::clone(&earning_repo),
        Arc::clone(&rating_repo),
        Arc::clone(&job_repo),
        config.rewards.coin_value_ngn,
        config.worker.max_attempts,
    ));

    let driver_service = Arc::new(DriverService::new(
        pool.clone(),
        Arc::clone(&driver_repo),
        Arc::clone(&notification_repo),
    ));
    let magazine_service = Arc::new(MagazineService::new(Arc::clone(&magazine_repo)));
    let pickup_service = Arc::new(PickupService::new(
        pool.clone(),
        Arc::clone(&pickup_repo),
        Arc::clone(&driver_repo),
        Arc::clone(&magazine_repo),
        Arc::clone(&job_repo),
        config.pickup.clone(),
        config.worker.max_attempts,
    ));
    let review_service = Arc::new(ReviewService::new(
        Arc::clone(&magazine_repo),
        Arc::clone(&driver_repo),
        Arc::clone(&pickup_repo),
        Arc::clone(&scan_repo),
        Arc::clone(&rating_repo),
        Arc::clone(&dispatcher),
        config.rewards.clone(),
    ));
    let earning_service = Arc::new(EarningService::new(
        Arc::clone(&earning_repo),
        Arc::clone(&award_repo),
    ));
    let notification_service = Arc::new(NotificationService::new(Arc::clone(&notification_repo)));

    // ── Step 3: Shutdown channel, worker and scheduler ───────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut worker_handle = None;
    let mut scheduler = None;
    if config.worker.enabled {
        let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().to_string()[..8]);
        let job_queue = Arc::new(JobQueue::new(
            Arc::clone(&job_repo),
            worker_id,
            config.worker.retry_backoff_seconds,
        ));

        let mut executor = beyondtrips_worker::executor::JobExecutor::new();
        executor.register(Arc::new(RewardCounterHandler::new(Arc::clone(
            &pickup_repo,
        ))));
        executor.register(Arc::new(DriverNotifyHandler::new(Arc::clone(
            &notification_repo,
        ))));
        executor.register(Arc::new(AdminAuditHandler::new(Arc::clone(&audit_repo))));
        executor.register(Arc::new(OverduePickupSweepHandler::new(
            Arc::clone(&pickup_repo),
            Arc::clone(&notification_repo),
            Arc::clone(&audit_repo),
        )));
        executor.register(Arc::new(ScanEventPruneHandler::new(Arc::clone(&scan_repo))));
        executor.register(Arc::new(JobPruneHandler::new(Arc::clone(&job_repo))));

        let runner = WorkerRunner::new(
            Arc::clone(&job_queue),
            Arc::new(executor),
            config.worker.clone(),
        );

        let worker_cancel = shutdown_rx.clone();
        worker_handle = Some(tokio::spawn(async move {
            runner.run(worker_cancel).await;
        }));

        let cron = CronScheduler::new(
            Arc::clone(&job_queue),
            config.pickup.overdue_sweep_interval_hours,
        )
        .await?;
        cron.register_default_tasks().await?;
        cron.start().await?;
        scheduler = Some(cron);
    }

    // ── Step 4: Build and start HTTP server ──────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        db,
        driver_service,
        magazine_service,
        pickup_service,
        review_service,
        earning_service,
        notification_service,
        job_repo,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Beyond Trips server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Drain background tasks ───────────────────────────
    if let Some(mut cron) = scheduler {
        if let Err(e) = cron.shutdown().await {
            tracing::warn!(error = %e, "Cron scheduler shutdown failed");
        }
    }
    if let Some(handle) = worker_handle {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Worker task join failed");
        }
    }

    tracing::info!("Beyond Trips server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
