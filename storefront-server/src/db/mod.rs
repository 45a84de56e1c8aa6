//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Single-statement writes; row atomicity comes from Postgres
//! - "No row" results surface as `DbError::NotFound`, everything else as `DbError::Sqlx`

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect_with, create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
