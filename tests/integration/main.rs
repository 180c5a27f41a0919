//! End-to-end tests driving the full HTTP router against a live
//! PostgreSQL instance.
//!
//! Connection settings come from `config/test.toml`; set
//! `BEYONDTRIPS__DATABASE__URL` to point the suite at a different
//! database.


mod admin_catalog_test;
mod driver_portal_test;
mod jobs_test;
mod pickup_lifecycle_test;
mod rider_review_test;
