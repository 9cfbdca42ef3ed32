//! HTTP clients for QuickBarcode.
//!
//! Two thin façades over the inventory server's REST API:
//! - [`RegistryClient`] lists, links and unlinks barcodes (`/api/barcode/...`)
//! - [`InventoryClient`] reads a part's IPN or a stock item's serial
//!
//! Both are built from one immutable [`RegistryConfig`] and hold no state
//! besides it, so they can be shared freely across concurrent
//! reconciliations. Neither retries.

mod client;
mod config;
mod error;
mod inventory;

pub use client::{BarcodeRegistry, RegistryClient};
pub use config::{RegistryConfig, DEFAULT_TIMEOUT_SECS};
pub use error::{RegistryError, RegistryResult};
pub use inventory::InventoryClient;
