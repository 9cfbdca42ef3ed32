//! Registry error types.

use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by the HTTP clients.
///
/// An ordinary rejection by the registry (non-2xx, missing success marker)
/// is not an error: the mutating calls report it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Missing or unusable endpoint / credentials.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Network, DNS, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response with a body we could not interpret.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Unexpected HTTP status from the inventory API.
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },
}

impl RegistryError {
    /// Returns true if the failure happened below HTTP.
    pub fn is_transport(&self) -> bool {
        matches!(self, RegistryError::Transport(_))
    }

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            RegistryError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
