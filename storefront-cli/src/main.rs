//! storefront CLI - product catalog API server
//!
//! Entry point for the `storefront` binary:
//! - `serve`: run the HTTP API (creates the products table unless told not to)
//! - `migrate`: create the products table and exit

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::StorefrontConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "storefront",
    author,
    version,
    about = "Product catalog CRUD API backed by Postgres"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.storefront/config.toml)
    #[arg(long, global = true, env = "STOREFRONT_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the products table and exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before parsing so clap's `env` attributes see it
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();
    dotenv.log();

    let file_config = StorefrontConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, file_config).await?,
        Commands::Migrate(args) => commands::run_migrate(args, file_config).await?,
    }
    Ok(())
}
