//! Engine settings.
//!
//! Keys mirror the plugin settings of the inventory host so an exported
//! settings document can be loaded as-is. Every key is optional.

use crate::error::{SyncError, SyncResult};
use quickbarcode_registry::{RegistryConfig, DEFAULT_TIMEOUT_SECS};
use quickbarcode_types::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Log verbosity selected in the settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Informational messages, warnings and errors.
    Info,
    /// Warnings and errors only.
    #[default]
    #[serde(alias = "warn")]
    Warning,
    /// Everything.
    Debug,
}

impl LogLevel {
    /// The directive understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Debug => "debug",
        }
    }
}

/// Immutable settings for one engine instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct SyncSettings {
    /// Link part IPNs.
    pub enable_parts: bool,
    /// Link stock item serials.
    pub enable_stock: bool,
    /// Validate TLS certificates of the site.
    pub validate_ssl: bool,
    /// Remove stale barcodes when linking a new identifier.
    pub unlink_others: bool,
    pub log_level: LogLevel,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    /// Per-call HTTP timeout.
    pub timeout_secs: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enable_parts: true,
            enable_stock: true,
            validate_ssl: true,
            unlink_others: false,
            log_level: LogLevel::Warning,
            api_key: None,
            api_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SyncSettings {
    /// Parses a JSON settings document.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON settings document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> SyncResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Settings(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Whether linking is enabled for the given entity kind.
    pub fn is_enabled(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Part => self.enable_parts,
            EntityKind::StockItem => self.enable_stock,
        }
    }

    /// Connection settings for the HTTP clients.
    pub fn registry_config(&self) -> SyncResult<RegistryConfig> {
        let url = non_blank(self.api_url.as_deref())
            .ok_or_else(|| SyncError::Configuration("API_URL is not set".to_string()))?;
        let key = non_blank(self.api_key.as_deref())
            .ok_or_else(|| SyncError::Configuration("API_KEY is not set".to_string()))?;

        Ok(RegistryConfig::new(url, key)
            .with_validate_certs(self.validate_ssl)
            .with_timeout_secs(self.timeout_secs))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// API_KEY stays out of logs.
impl fmt::Debug for SyncSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSettings")
            .field("enable_parts", &self.enable_parts)
            .field("enable_stock", &self.enable_stock)
            .field("validate_ssl", &self.validate_ssl)
            .field("unlink_others", &self.unlink_others)
            .field("log_level", &self.log_level)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
