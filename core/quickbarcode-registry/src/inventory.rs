//! Inventory entity lookups.
//!
//! Reads the canonical identifier of a part (`IPN`) or stock item
//! (`serial`) from the detail endpoints of the inventory API.

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use quickbarcode_types::{EntityKind, EntityRef};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Read-only client for part and stock item details.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    base_url: String,
    client: Client,
}

impl InventoryClient {
    pub fn new(config: &RegistryConfig) -> RegistryResult<Self> {
        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            client: config.build_http_client()?,
        })
    }

    /// Fetches an entity with its current identifier.
    ///
    /// Returns `Ok(None)` on 404: the entity was deleted after the event
    /// was emitted.
    pub async fn fetch_entity(
        &self,
        kind: EntityKind,
        entity_id: i64,
    ) -> RegistryResult<Option<EntityRef>> {
        let url = format!("{}/api/{}/{}/", self.base_url, kind.api_segment(), entity_id);
        debug!("Fetching {} {}: {}", kind, entity_id, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(RegistryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let detail: Value = serde_json::from_str(&body)
            .map_err(|e| RegistryError::Decode(format!("{kind} detail: {e}")))?;

        let identifier = detail
            .get(kind.identifier_field())
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Some(EntityRef::new(kind, entity_id, identifier)))
    }
}
