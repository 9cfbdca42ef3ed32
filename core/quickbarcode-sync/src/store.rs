//! Entity store seam.

use crate::error::SyncResult;
use async_trait::async_trait;
use quickbarcode_registry::InventoryClient;
use quickbarcode_types::{EntityKind, EntityRef};

/// Source of truth for entity identifiers.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Looks up an entity by primary key.
    ///
    /// `Ok(None)` means the entity no longer exists.
    async fn lookup(&self, kind: EntityKind, id: i64) -> SyncResult<Option<EntityRef>>;
}

#[async_trait]
impl EntityStore for InventoryClient {
    async fn lookup(&self, kind: EntityKind, id: i64) -> SyncResult<Option<EntityRef>> {
        Ok(self.fetch_entity(kind, id).await?)
    }
}
