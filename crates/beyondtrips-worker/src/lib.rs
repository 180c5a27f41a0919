//! Background processing: the job runner and its cron ticker.
//!
//! The HTTP layer never performs reward side effects inline. Services
//! enqueue jobs through the database-backed [`JobQueue`]; the
//! [`WorkerRunner`] claims and executes them, and the [`CronScheduler`]
//! feeds in the periodic maintenance sweeps.

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;
pub mod scheduler;

pub use queue::JobQueue;
pub use runner::WorkerRunner;
pub use scheduler::CronScheduler;
