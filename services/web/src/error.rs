//! services/web/src/error.rs
//!
//! Defines the primary error type for the entire web service.

use crate::config::ConfigError;
use miniblog_core::ports::PortError;

/// The primary error type for the `web` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error that propagated up from the storage port.
    #[error("Service port error: {0}")]
    Port(#[from] PortError),

    /// An error from the underlying database library.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A standard Input/Output error (e.g., binding the listen socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
