//! storefront-server: product catalog HTTP API
//!
//! Exposes create/list/get/update/delete over a single `products` table.
//! Storage sits behind the [`db::ProductRepository`] trait so the router can
//! run against Postgres or the in-memory repository used in tests.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, MemoryProductRepo, PgProductRepo, ProductRepository};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
