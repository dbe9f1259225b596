//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the StudioSync
//! API server. Values come from environment variables, with defaults where
//! appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on; falls back to `PORT`, then 5000
//! - `STORE`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins, or `*`
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `MAX_VIEWERS`: Concurrent live viewers allowed (default: 1024)
//! - `NOTIFIER_CAPACITY`: Events buffered per viewer (default: 64)
//! - `ADMIN_AUTH`: `true` to require admin credentials on writes
//! - `SEED_DEFAULT_SCHEDULE`: `true` to seed an empty store at startup
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD`: admin registered in a `memory` store

use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

/// Where time slots are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

/// Allowed cross-origin callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

/// Configuration for the StudioSync API server
///
/// # Example
///
/// ```
/// use eyre::Result;
/// use studiosync_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Backing store for the schedule
    pub store: StoreBackend,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<CorsOrigins>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Maximum number of concurrent live viewers
    pub max_viewers: usize,

    /// Per-viewer event buffer before events are coalesced
    pub notifier_capacity: usize,

    /// Require admin credentials on write routes
    pub admin_auth: bool,

    /// Seed the default week into an empty store at startup
    pub seed_default_schedule: bool,

    /// Admin registered at startup when the store is in memory
    pub admin_credentials: Option<(String, String)>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` is not set while the postgres store is selected
    /// - `STORE` names an unknown backend
    /// - The port value cannot be parsed as a u16
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .or_else(|| lookup("PORT"))
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Storage settings
        let store = match lookup("STORE").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?,
            },
            "memory" => StoreBackend::Memory,
            other => return Err(eyre!("Unknown STORE value: {}", other)),
        };

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            if origins.trim() == "*" {
                CorsOrigins::Any
            } else {
                CorsOrigins::List(origins.split(',').map(|s| s.trim().to_string()).collect())
            }
        });

        // Performance settings
        let request_timeout = parse_or(&lookup, "API_REQUEST_TIMEOUT_SECONDS", 30);
        let max_viewers = parse_or(&lookup, "MAX_VIEWERS", 1024);
        let notifier_capacity = parse_or(&lookup, "NOTIFIER_CAPACITY", 64);

        // Admin settings
        let admin_auth = flag(&lookup, "ADMIN_AUTH");
        let seed_default_schedule = flag(&lookup, "SEED_DEFAULT_SCHEDULE");
        let admin_credentials = lookup("ADMIN_USERNAME").zip(lookup("ADMIN_PASSWORD"));

        Ok(Self {
            host,
            port,
            store,
            log_level,
            cors_origins,
            request_timeout,
            max_viewers,
            notifier_capacity,
            admin_auth,
            seed_default_schedule,
            admin_credentials,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn flag<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    matches!(
        lookup(key).as_deref().map(str::trim),
        Some("1") | Some("true") | Some("yes")
    )
}
