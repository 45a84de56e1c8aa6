//! Create the products table without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use storefront_server::db::migrations;

use crate::config::StorefrontConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file and DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: StorefrontConfig) -> Result<()> {
    let pool = super::connect(&config, args.database_url.as_deref(), Some(1)).await?;

    migrations::run(&pool)
        .await
        .context("Failed to create products table")?;

    pool.close().await;
    println!("products table ready");
    Ok(())
}
