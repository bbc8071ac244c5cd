//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `DATABASE_URL` - store connection string; when absent the store client
//!   stays unconfigured and every store-backed route answers 500
//! - `DATABASE_NAME` - `PostgreSQL` schema holding the document table
//!   (default: webshop)
//! - `HOST` - bind address (default: 0.0.0.0)
//! - `PORT` - listen port (default: 8000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Webshop application configuration.
#[derive(Debug, Clone)]
pub struct WebshopConfig {
    /// Store connection string (contains password). `None` runs the service
    /// in degraded mode: diagnostics report the state, everything else 500s.
    pub database_url: Option<SecretString>,
    /// `PostgreSQL` schema holding the document table.
    pub database_name: String,
    /// Whether `DATABASE_NAME` was set explicitly rather than defaulted.
    pub database_name_set: bool,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
}

impl WebshopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. A
    /// missing `DATABASE_URL` is NOT an error; the service starts degraded.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present variable fails to parse, or if the
    /// store name is not a plain identifier.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_optional_env("DATABASE_URL").map(SecretString::from);
        let database_name_env = get_optional_env("DATABASE_NAME");
        let database_name_set = database_name_env.is_some();
        let database_name = database_name_env.unwrap_or_else(|| "webshop".to_owned());
        // The schema name ends up inside DDL and query text, so it must be a
        // plain identifier.
        validate_identifier(&database_name, "DATABASE_NAME")?;

        let host = get_env_or_default("HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_owned(), e.to_string()))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            database_name,
            database_name_set,
            host,
            port,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether a store connection string was provided.
    #[must_use]
    pub const fn store_configured(&self) -> bool {
        self.database_url.is_some()
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate that a value is a plain SQL identifier.
fn validate_identifier(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_owned(),
            format!("'{value}' is not a plain identifier"),
        ))
    }
}
