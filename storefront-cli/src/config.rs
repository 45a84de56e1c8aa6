//! Configuration loading for the storefront CLI
//!
//! Sources, highest priority first:
//! 1. CLI flags / environment variables (clap `env`)
//! 2. TOML config file (`--config` or ~/.storefront/config.toml)
//! 3. Built-in defaults
//!
//! `.env` files are loaded before argument parsing so they feed step 1.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use tracing::{debug, info, warn};

/// Default Postgres port when assembling from parts
const DEFAULT_DB_PORT: u16 = 5432;

/// Config file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub cors_origins: Option<Vec<String>>,
    pub cors_permissive: Option<bool>,
}

/// Database settings: either a full `url` or separate connection parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub sslmode: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {} (invalid TOML): {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "no database configured. Set DATABASE_URL, pass --database-url, \
         set DB_HOST/DB_USER/DB_NAME, or add [database] to the config file"
    )]
    MissingDatabase,

    #[error("invalid database setting: {0}")]
    InvalidDatabase(String),
}

impl StorefrontConfig {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, ~/.storefront/config.toml
    /// is read when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_owned())),
            Some(path) => path.to_owned(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get config file path: ~/.storefront/config.toml
    pub fn default_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }
}

impl DatabaseSection {
    /// Fill unset connection parts from `DB_HOST`, `DB_PORT`, `DB_USER`,
    /// `DB_PASSWORD` and `DB_NAME`. Environment wins over the file.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = var("DB_HOST") {
            self.host = Some(host);
        }
        if let Some(port) = var("DB_PORT") {
            let port = port
                .parse()
                .map_err(|_| ConfigError::InvalidDatabase(format!("DB_PORT '{}'", port)))?;
            self.port = Some(port);
        }
        if let Some(user) = var("DB_USER") {
            self.user = Some(user);
        }
        if let Some(password) = var("DB_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(name) = var("DB_NAME") {
            self.name = Some(name);
        }
        Ok(self)
    }

    /// Resolve connect options. `url_override` (flag or DATABASE_URL) wins,
    /// then the file's `url`, then the separate parts.
    pub fn connect_options(
        &self,
        url_override: Option<&str>,
    ) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = url_override.or(self.url.as_deref()) {
            return PgConnectOptions::from_str(url)
                .map_err(|e| ConfigError::InvalidDatabase(format!("database url: {}", e)));
        }

        let (Some(host), Some(name)) = (self.host.as_deref(), self.name.as_deref()) else {
            return Err(ConfigError::MissingDatabase);
        };

        let sslmode = self.sslmode.as_deref().unwrap_or("disable");
        let ssl_mode = PgSslMode::from_str(sslmode)
            .map_err(|_| ConfigError::InvalidDatabase(format!("sslmode '{}'", sslmode)))?;

        let mut options = PgConnectOptions::new()
            .host(host)
            .port(self.port.unwrap_or(DEFAULT_DB_PORT))
            .database(name)
            .ssl_mode(ssl_mode);
        if let Some(user) = self.user.as_deref() {
            options = options.username(user);
        }
        if let Some(password) = self.password.as_deref() {
            options = options.password(password);
        }
        Ok(options)
    }
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.storefront/.env
///
/// dotenvy never overwrites a variable that is already set. Runs before
/// tracing is up, so the outcome is returned for the caller to log.
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport::default();

    if let Ok(path) = dotenvy::dotenv() {
        report.loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => report.loaded.push(env_file),
                Err(e) => report.failed.push((env_file, e.to_string())),
            }
        }
    }

    report
}

/// Which .env files were applied and which could not be read
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl DotenvReport {
    pub fn log(&self) {
        for (path, error) in &self.failed {
            warn!("Failed to load {}: {}", path.display(), error);
        }
        if self.loaded.is_empty() {
            debug!("No .env files found (current dir or ~/.storefront)");
        } else {
            let paths: Vec<_> = self.loaded.iter().map(|p| p.display().to_string()).collect();
            debug!("Loaded .env from: {}", paths.join(", "));
        }
    }
}

/// Get the storefront config directory path (~/.storefront)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".storefront"))
}
