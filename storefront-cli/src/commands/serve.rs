//! HTTP server command for the storefront product API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use storefront_server::db::{migrations, PgProductRepo};
use storefront_server::http::server::DEFAULT_CORS_ORIGIN;
use storefront_server::{run_server, AppState, ServerConfig};

use crate::config::StorefrontConfig;

/// Default bind address when neither flag nor config sets one
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8080)
    #[arg(long, short = 'b', env = "STOREFRONT_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config file and DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum connections in the database pool (default: 5)
    #[arg(long, env = "STOREFRONT_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Allowed CORS origin, repeatable (default: http://localhost:3000)
    #[arg(long = "cors-origin", value_name = "ORIGIN", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Do not create the products table on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

impl ServeArgs {
    /// Merge flags over the config file over defaults.
    pub fn server_config(&self, config: &StorefrontConfig) -> Result<ServerConfig> {
        let bind_addr = match self.bind.or(config.server.bind) {
            Some(addr) => addr,
            None => DEFAULT_BIND.parse().context("invalid default bind address")?,
        };

        let cors_origins = if !self.cors_origins.is_empty() {
            self.cors_origins.clone()
        } else {
            config
                .server
                .cors_origins
                .clone()
                .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()])
        };

        Ok(ServerConfig {
            bind_addr,
            cors_origins,
            cors_permissive: self.cors_permissive || config.server.cors_permissive.unwrap_or(false),
        })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: StorefrontConfig) -> Result<()> {
    let server_config = args.server_config(&config)?;

    let pool = super::connect(&config, args.database_url.as_deref(), args.max_connections).await?;

    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to create products table")?;
    }

    tracing::info!("Starting storefront server on {}", server_config.bind_addr);
    let state = AppState::new(Arc::new(PgProductRepo::new(pool)));

    // Run server (blocks until shutdown)
    run_server(state, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
