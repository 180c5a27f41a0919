//! Job runner tuning.

use serde::{Deserialize, Serialize};

/// Background worker knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Set false to serve HTTP without processing jobs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Jobs executed in parallel.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Seconds between queue polls when nothing is pending.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Delivery attempts granted to enqueued jobs.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
    /// First retry delay in seconds; doubles on each further failure.
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_seconds: i64,
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    4
}

fn default_poll_interval() -> u64 {
    5
}

fn default_max_attempts() -> i32 {
    5
}

fn default_retry_backoff() -> i64 {
    60
}
