//! Barcode registry client.
//!
//! Wraps the three `/api/barcode/` endpoints the reconciler needs. The
//! request and response shapes are fixed by the server and reproduced
//! exactly.

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use async_trait::async_trait;
use quickbarcode_types::{BarcodeRecord, EntityKind};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Operations the reconciliation engine needs from the barcode registry.
#[async_trait]
pub trait BarcodeRegistry: Send + Sync {
    /// Lists the barcodes currently linked to an entity.
    ///
    /// A non-success HTTP status yields an empty list; only transport and
    /// decode failures are errors.
    async fn list_links(
        &self,
        kind: EntityKind,
        entity_id: i64,
    ) -> RegistryResult<Vec<BarcodeRecord>>;

    /// Links `barcode` to an entity. `Ok(false)` means the registry refused.
    async fn link(&self, barcode: &str, kind: EntityKind, entity_id: i64) -> RegistryResult<bool>;

    /// Removes the link for `barcode`, whichever entity owns it.
    async fn unlink(&self, barcode: &str) -> RegistryResult<bool>;
}

/// HTTP implementation of [`BarcodeRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    client: Client,
}

impl RegistryClient {
    /// Builds a client. Fails with [`RegistryError::Config`] when the site
    /// URL or token is missing.
    pub fn new(config: &RegistryConfig) -> RegistryResult<Self> {
        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            client: config.build_http_client()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn lookup_url(&self, kind: EntityKind, entity_id: i64) -> String {
        format!(
            "{}/api/barcode/?{}={}",
            self.base_url,
            kind.registry_key(),
            entity_id
        )
    }
}

fn is_accepted(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201)
}

/// Pulls `barcode_data` out of each row, dropping rows without a string value.
fn records_from_rows(rows: Vec<Value>, kind: EntityKind, entity_id: i64) -> Vec<BarcodeRecord> {
    rows.into_iter()
        .filter_map(|row| match row.get("barcode_data").and_then(Value::as_str) {
            Some(data) => Some(BarcodeRecord::new(data, kind, entity_id)),
            None => {
                debug!("Skipping barcode row without barcode_data: {}", row);
                None
            }
        })
        .collect()
}

#[async_trait]
impl BarcodeRegistry for RegistryClient {
    async fn list_links(
        &self,
        kind: EntityKind,
        entity_id: i64,
    ) -> RegistryResult<Vec<BarcodeRecord>> {
        let url = self.lookup_url(kind, entity_id);
        debug!("Looking up barcodes: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                "Barcode lookup for {} {} failed with status {}",
                kind, entity_id, status
            );
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let rows: Vec<Value> = serde_json::from_str(&body)
            .map_err(|e| RegistryError::Decode(format!("barcode list: {e}")))?;

        Ok(records_from_rows(rows, kind, entity_id))
    }

    async fn link(&self, barcode: &str, kind: EntityKind, entity_id: i64) -> RegistryResult<bool> {
        let mut payload = Map::new();
        payload.insert("barcode".to_string(), Value::from(barcode));
        payload.insert(kind.registry_key().to_string(), Value::from(entity_id));

        debug!("Linking barcode '{}' to {} {}", barcode, kind, entity_id);

        let response = self
            .client
            .post(format!("{}/api/barcode/link/", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let has_success = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.as_object().map(|o| o.contains_key("success")))
            .unwrap_or(false);

        if is_accepted(status) && has_success {
            Ok(true)
        } else {
            warn!("Link of '{}' rejected: status {} - {}", barcode, status, body);
            Ok(false)
        }
    }

    async fn unlink(&self, barcode: &str) -> RegistryResult<bool> {
        debug!("Unlinking barcode '{}'", barcode);

        let response = self
            .client
            .post(format!("{}/api/barcode/unlink/", self.base_url))
            .json(&serde_json::json!({ "barcode": barcode }))
            .send()
            .await?;

        let status = response.status();
        if is_accepted(status) {
            Ok(true)
        } else {
            warn!("Unlink of '{}' rejected: status {}", barcode, status);
            Ok(false)
        }
    }
}
