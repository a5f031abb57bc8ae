//! crates/miniblog_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! The trait here forms the boundary between the domain and concrete storage
//! backends, keeping the core independent of any particular database.

use async_trait::async_trait;

use crate::domain::Entry;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations, abstracting away the
/// specific errors of the underlying store.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The store could not be opened or a write could not be committed.
    /// Fatal for the current request; never retried.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Persistence port for blog entries.
///
/// Entries are immutable once created, so the port deliberately offers no
/// update or delete operation.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Returns every entry, newest first (descending id). Empty when the
    /// store holds no entries. Read-only, no side effects.
    async fn list_entries(&self) -> PortResult<Vec<Entry>>;

    /// Inserts one entry and commits it. Title and text are opaque strings:
    /// empty values and embedded markup are accepted as-is, and either the
    /// row is committed or nothing becomes visible.
    async fn add_entry(&self, title: &str, text: &str) -> PortResult<()>;
}
