//! # beyondtrips-database
//!
//! PostgreSQL access: the connection pool, embedded schema migrations,
//! and one repository per entity.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
