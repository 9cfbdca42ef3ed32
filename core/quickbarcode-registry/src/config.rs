//! Connection settings shared by both clients.

use crate::error::{RegistryError, RegistryResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Per-call timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoint and credentials for the inventory server.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Site URL, e.g. `https://inventree.example.com`.
    pub base_url: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: String,
    /// Whether TLS certificates are validated.
    #[serde(default = "default_true")]
    pub validate_certs: bool,
    /// Hard timeout for a single HTTP call.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RegistryConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            validate_certs: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn with_validate_certs(mut self, validate: bool) -> Self {
        self.validate_certs = validate;
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Base URL without trailing slashes.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Checks that endpoint and token are present and the timeout is usable.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.normalized_base_url().is_empty() {
            return Err(RegistryError::Config("site URL is not set".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(RegistryError::Config("API token is not set".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(RegistryError::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the HTTP client carrying auth and content-type headers.
    pub(crate) fn build_http_client(&self) -> RegistryResult<Client> {
        self.validate()?;

        let mut auth = HeaderValue::from_str(&format!("Token {}", self.token.trim()))
            .map_err(|_| RegistryError::Config("API token is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if !self.validate_certs {
            warn!("TLS certificate validation is disabled for {}", self.normalized_base_url());
        }

        Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(self.timeout_secs))
            .danger_accept_invalid_certs(!self.validate_certs)
            .user_agent(concat!("quickbarcode/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RegistryError::Config(format!("failed to build HTTP client: {e}")))
    }
}

// Keeps the token out of logs.
impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("validate_certs", &self.validate_certs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
