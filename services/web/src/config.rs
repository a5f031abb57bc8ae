//! services/web/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup and is
//! immutable afterwards. A `.env` file is used for local development; a
//! settings file named by `MINIBLOG_SETTINGS` overrides the built-in
//! defaults for deployments.

use std::net::SocketAddr;

use miniblog_core::domain::AdminCredentials;
use tracing::Level;

/// Built-in development signing key. Long enough for key derivation, but
/// public; deployments must set SECRET_KEY.
const DEV_SECRET_KEY: &str = "development key; replace with a long random value";

/// The signing key feeds an HKDF expansion that needs this much input.
const MIN_SECRET_KEY_BYTES: usize = 32;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub secret_key: String,
    pub admin: AdminCredentials,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// An operator-supplied settings file (`MINIBLOG_SETTINGS`) is read
    /// first, then a local `.env` for development; the `.env` lookup is
    /// skipped under test to keep tests hermetic. Real environment
    /// variables always win over either file.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("MINIBLOG_SETTINGS") {
            dotenvy::from_path(&path).map_err(|e| {
                ConfigError::InvalidValue("MINIBLOG_SETTINGS".to_string(), e.to_string())
            })?;
        }
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:5000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://miniblog.db?mode=rwc".to_string());

        // --- Session Signing Key ---
        let secret_key =
            std::env::var("SECRET_KEY").unwrap_or_else(|_| DEV_SECRET_KEY.to_string());
        if secret_key.len() < MIN_SECRET_KEY_BYTES {
            return Err(ConfigError::InvalidValue(
                "SECRET_KEY".to_string(),
                format!("must be at least {MIN_SECRET_KEY_BYTES} bytes"),
            ));
        }

        // --- Administrator Credentials ---
        let admin = AdminCredentials {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "default".to_string()),
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            database_url,
            secret_key,
            admin,
            log_level,
        })
    }
}
