//! # cadence-storage
//!
//! SQLite-backed event store for the Cadence metrics engine. Owns the
//! schema and the write-time validation of incoming events, and implements
//! the read-only [`cadence_core::IEventStore`] seam the metric computers
//! consume.

pub mod engine;
pub mod migrations;
pub mod queries;

pub use engine::SqliteEventStore;

use cadence_core::errors::{CadenceError, StorageError};

/// Wrap a low-level SQLite failure message into the workspace error type.
pub fn to_storage_err(message: impl Into<String>) -> CadenceError {
    StorageError::Sqlite {
        message: message.into(),
    }
    .into()
}
