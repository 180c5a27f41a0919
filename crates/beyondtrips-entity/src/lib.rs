//! # beyondtrips-entity
//!
//! Domain models. Each struct mirrors a database row or a value object
//! carried between layers; row types derive `sqlx::FromRow` alongside
//! the usual `Debug`/`Clone`/serde set.

pub mod audit;
pub mod driver;
pub mod earning;
pub mod job;
pub mod magazine;
pub mod notification;
pub mod pickup;
pub mod rating;
pub mod reward;
pub mod scan;
