//! Shared test helpers for quickbarcode-sync.

#![allow(dead_code)]

use async_trait::async_trait;
use quickbarcode_registry::{BarcodeRegistry, RegistryError, RegistryResult};
use quickbarcode_sync::{EntityStore, SyncError, SyncResult};
use quickbarcode_types::{BarcodeRecord, EntityKind, EntityRef};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A registry call as seen by [`FakeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(EntityKind, i64),
    Link(String, EntityKind, i64),
    Unlink(String),
}

/// In-memory registry that records every call.
#[derive(Default)]
pub struct FakeRegistry {
    links: Mutex<HashMap<(EntityKind, i64), Vec<String>>>,
    calls: Mutex<Vec<Call>>,
    rejected: Mutex<HashSet<String>>,
    broken: Mutex<HashSet<String>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the barcodes linked to an entity.
    pub fn with_links(self, kind: EntityKind, id: i64, barcodes: &[&str]) -> Self {
        self.links.lock().unwrap().insert(
            (kind, id),
            barcodes.iter().map(|b| b.to_string()).collect(),
        );
        self
    }

    /// Makes link/unlink of `barcode` return `Ok(false)`.
    pub fn rejecting(self, barcode: &str) -> Self {
        self.rejected.lock().unwrap().insert(barcode.to_string());
        self
    }

    /// Makes link/unlink of `barcode` fail with a decode error.
    pub fn failing(self, barcode: &str) -> Self {
        self.broken.lock().unwrap().insert(barcode.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List(..)))
            .collect()
    }

    pub fn linked(&self, kind: EntityKind, id: i64) -> Vec<String> {
        self.links
            .lock()
            .unwrap()
            .get(&(kind, id))
            .cloned()
            .unwrap_or_default()
    }

    fn outcome(&self, barcode: &str) -> RegistryResult<bool> {
        if self.broken.lock().unwrap().contains(barcode) {
            return Err(RegistryError::Decode(format!("broken barcode {barcode}")));
        }
        Ok(!self.rejected.lock().unwrap().contains(barcode))
    }
}

#[async_trait]
impl BarcodeRegistry for FakeRegistry {
    async fn list_links(&self, kind: EntityKind, id: i64) -> RegistryResult<Vec<BarcodeRecord>> {
        self.calls.lock().unwrap().push(Call::List(kind, id));
        Ok(self
            .linked(kind, id)
            .into_iter()
            .map(|b| BarcodeRecord::new(b, kind, id))
            .collect())
    }

    async fn link(&self, barcode: &str, kind: EntityKind, id: i64) -> RegistryResult<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Link(barcode.to_string(), kind, id));
        let ok = self.outcome(barcode)?;
        if ok {
            self.links
                .lock()
                .unwrap()
                .entry((kind, id))
                .or_default()
                .push(barcode.to_string());
        }
        Ok(ok)
    }

    async fn unlink(&self, barcode: &str) -> RegistryResult<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Unlink(barcode.to_string()));
        let ok = self.outcome(barcode)?;
        if ok {
            for barcodes in self.links.lock().unwrap().values_mut() {
                barcodes.retain(|b| b != barcode);
            }
        }
        Ok(ok)
    }
}

/// In-memory entity store.
#[derive(Default)]
pub struct FakeStore {
    entities: HashMap<(EntityKind, i64), EntityRef>,
    broken: bool,
    lookups: Mutex<usize>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entity: EntityRef) -> Self {
        self.entities.insert((entity.kind, entity.id), entity);
        self
    }

    /// Every lookup fails.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl EntityStore for FakeStore {
    async fn lookup(&self, kind: EntityKind, id: i64) -> SyncResult<Option<EntityRef>> {
        *self.lookups.lock().unwrap() += 1;
        if self.broken {
            return Err(SyncError::Store("database unavailable".to_string()));
        }
        Ok(self.entities.get(&(kind, id)).cloned())
    }
}

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
