//! Rider-facing scan and review flow.

pub mod service;

pub use service::{ReviewOutcome, ReviewService, ScanOutcome, SubmitReview};
