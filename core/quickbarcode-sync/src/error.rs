//! Error types for the reconciliation layer.

use quickbarcode_registry::RegistryError;
use thiserror::Error;

/// Result type for reconciliation operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while resolving or reconciling an entity.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing credentials or endpoint.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Registry or inventory API failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Failure of an [`EntityStore`](crate::EntityStore) that isn't backed
    /// by the registry site. The HTTP store reports through `Registry`
    /// instead; other implementations return this.
    #[error("entity store error: {0}")]
    Store(String),

    /// Settings document could not be read or parsed.
    #[error("settings error: {0}")]
    Settings(String),
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Settings(e.to_string())
    }
}
