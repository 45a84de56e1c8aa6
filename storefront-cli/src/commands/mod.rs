//! Command implementations for the storefront CLI

pub mod migrate;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use sqlx::PgPool;
use storefront_server::db::{connect_with, DEFAULT_MAX_CONNECTIONS};

use crate::config::StorefrontConfig;

/// Resolve database settings (flag/env > config file > DB_* parts) and connect.
async fn connect(
    config: &StorefrontConfig,
    database_url: Option<&str>,
    max_connections: Option<u32>,
) -> Result<PgPool> {
    let database = config
        .database
        .clone()
        .merge_env(|key| std::env::var(key).ok())?;
    let options = database.connect_options(database_url)?;
    let max_connections = max_connections
        .or(database.max_connections)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    connect_with(options, max_connections)
        .await
        .context("Failed to create database pool")
}
