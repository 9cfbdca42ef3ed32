//! Core type definitions for QuickBarcode.
//!
//! This crate defines the plain data shared by the registry client, the
//! reconciliation engine and the webhook host:
//! - Entity kinds and references (parts keyed by IPN, stock items by serial)
//! - Barcode records as reported by the registry
//! - Lifecycle events and the static event-name table
//!
//! Nothing in here performs I/O.

mod entity;
mod event;

pub use entity::{BarcodeRecord, EntityKind, EntityRef};
pub use event::{EventKind, LifecycleEvent};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),
}
