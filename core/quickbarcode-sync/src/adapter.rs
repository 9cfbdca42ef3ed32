//! Lifecycle event handling.
//!
//! The adapter is the boundary between the host and the engine. Every
//! failure is folded into an [`EventReport`]; nothing is returned as `Err`.

use crate::reconciler::{plan_cleanup, ReconcileRequest};
use crate::settings::SyncSettings;
use crate::store::EntityStore;
use crate::supervisor::{BatchOutcome, ExecutionSupervisor};
use quickbarcode_registry::{BarcodeRegistry, InventoryClient, RegistryClient};
use quickbarcode_types::{EntityKind, EntityRef, EventKind, LifecycleEvent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// What happened to one lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventReport {
    /// Not an event the engine acts on.
    Ignored { event: String },
    /// Linking is switched off for this entity kind.
    Disabled { kind: EntityKind },
    /// The event carried no usable primary key.
    MissingId { event: String },
    /// The entity was deleted before the event was handled.
    EntityVanished { kind: EntityKind, id: i64 },
    /// Actions were computed and executed.
    Reconciled {
        kind: EntityKind,
        id: i64,
        outcome: BatchOutcome,
    },
    /// Configuration, lookup or listing failed before any action ran.
    Failed {
        kind: EntityKind,
        id: i64,
        error: String,
    },
}

impl EventReport {
    /// False only for failed lookups and batches with a failed action.
    pub fn is_success(&self) -> bool {
        match self {
            EventReport::Reconciled { outcome, .. } => outcome.success,
            EventReport::Failed { .. } => false,
            _ => true,
        }
    }
}

struct Backend {
    store: Arc<dyn EntityStore>,
    supervisor: ExecutionSupervisor,
}

/// Routes lifecycle events into reconciliations.
pub struct EventAdapter {
    settings: SyncSettings,
    // Err holds the configuration problem, reported on every event.
    backend: Result<Backend, String>,
}

impl EventAdapter {
    /// Creates an adapter over explicit collaborators.
    pub fn new(
        settings: SyncSettings,
        registry: Arc<dyn BarcodeRegistry>,
        store: Arc<dyn EntityStore>,
    ) -> Self {
        Self {
            settings,
            backend: Ok(Backend {
                store,
                supervisor: ExecutionSupervisor::new(registry),
            }),
        }
    }

    /// Creates an adapter talking HTTP to the site named in `settings`.
    ///
    /// A configuration problem does not fail construction: it is reported
    /// as [`EventReport::Failed`] by every event that would need the site.
    pub fn from_settings(settings: SyncSettings) -> Self {
        let backend = settings
            .registry_config()
            .and_then(|config| {
                let registry = RegistryClient::new(&config)?;
                let inventory = InventoryClient::new(&config)?;
                Ok(Backend {
                    store: Arc::new(inventory),
                    supervisor: ExecutionSupervisor::new(Arc::new(registry)),
                })
            })
            .map_err(|e| {
                error!("Barcode linking is not configured: {}", e);
                e.to_string()
            });

        Self { settings, backend }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Whether the adapter has usable registry credentials.
    pub fn is_configured(&self) -> bool {
        self.backend.is_ok()
    }

    /// Dispatches a host notification by event name.
    pub async fn handle(&self, event: &LifecycleEvent) -> EventReport {
        let kind = event.kind();
        let entity_kind = match &kind {
            EventKind::PluginsLoaded => {
                debug!("Active settings: {:?}", self.settings);
                return EventReport::Ignored {
                    event: event.event.clone(),
                };
            }
            EventKind::Unknown(name) => {
                trace!("Ignoring event '{}'", name);
                return EventReport::Ignored {
                    event: event.event.clone(),
                };
            }
            EventKind::PartSaved | EventKind::PartDeleted => EntityKind::Part,
            EventKind::StockItemSaved | EventKind::StockItemDeleted => EntityKind::StockItem,
        };

        let id = match self.admit(entity_kind, event.id, &event.event) {
            Ok(id) => id,
            Err(report) => return report,
        };

        if kind.is_deletion() {
            self.cleanup_deleted(entity_kind, id).await
        } else {
            self.reconcile_saved(entity_kind, id).await
        }
    }

    /// Handles a create or update of an entity.
    pub async fn on_entity_saved(&self, kind: EntityKind, id: i64) -> EventReport {
        match self.admit(kind, Some(id), &EventKind::saved(kind).to_string()) {
            Ok(id) => self.reconcile_saved(kind, id).await,
            Err(report) => report,
        }
    }

    /// Handles deletion of an entity: every barcode linked to it is removed,
    /// whatever `UNLINK_OTHERS` says.
    pub async fn on_entity_deleted(&self, kind: EntityKind, id: i64) -> EventReport {
        match self.admit(kind, Some(id), &EventKind::deleted(kind).to_string()) {
            Ok(id) => self.cleanup_deleted(kind, id).await,
            Err(report) => report,
        }
    }

    /// Enablement, then a positive primary key. Runs before any I/O.
    fn admit(&self, kind: EntityKind, id: Option<i64>, event: &str) -> Result<i64, EventReport> {
        if !self.settings.is_enabled(kind) {
            return Err(EventReport::Disabled { kind });
        }
        id.filter(|id| *id > 0).ok_or_else(|| {
            debug!("Event '{}' carries no usable entity id ({:?})", event, id);
            EventReport::MissingId {
                event: event.to_string(),
            }
        })
    }

    fn backend(&self, kind: EntityKind, id: i64) -> Result<&Backend, EventReport> {
        self.backend.as_ref().map_err(|reason| {
            error!("Cannot reconcile {} {}: {}", kind, id, reason);
            EventReport::Failed {
                kind,
                id,
                error: reason.clone(),
            }
        })
    }

    async fn reconcile_saved(&self, kind: EntityKind, id: i64) -> EventReport {
        let backend = match self.backend(kind, id) {
            Ok(backend) => backend,
            Err(report) => return report,
        };

        let entity = match backend.store.lookup(kind, id).await {
            Ok(Some(entity)) => entity,
            Ok(None) => {
                warn!("{} {} no longer exists", kind, id);
                return EventReport::EntityVanished { kind, id };
            }
            Err(e) => {
                error!("Failed to load {} {}: {}", kind, id, e);
                return EventReport::Failed {
                    kind,
                    id,
                    error: e.to_string(),
                };
            }
        };

        let request = ReconcileRequest::new(entity, self.settings.unlink_others);

        // Without an identifier there is nothing to compare against.
        let current = if request.entity.identifier().is_none() {
            warn!(
                "{} has no {}, not linking",
                request.entity,
                kind.identifier_field()
            );
            Vec::new()
        } else {
            match backend.supervisor.registry().list_links(kind, id).await {
                Ok(current) => current,
                Err(e) => {
                    error!("Barcode lookup for {} {} failed: {}", kind, id, e);
                    return EventReport::Failed {
                        kind,
                        id,
                        error: e.to_string(),
                    };
                }
            }
        };

        let actions = request.plan(&current);
        let outcome = backend.supervisor.execute(&request.entity, actions).await;
        report_batch(kind, id, outcome)
    }

    async fn cleanup_deleted(&self, kind: EntityKind, id: i64) -> EventReport {
        let backend = match self.backend(kind, id) {
            Ok(backend) => backend,
            Err(report) => return report,
        };

        let current = match backend.supervisor.registry().list_links(kind, id).await {
            Ok(current) => current,
            Err(e) => {
                error!("Barcode lookup for deleted {} {} failed: {}", kind, id, e);
                return EventReport::Failed {
                    kind,
                    id,
                    error: e.to_string(),
                };
            }
        };

        let entity = EntityRef::unidentified(kind, id);
        let outcome = backend
            .supervisor
            .execute(&entity, plan_cleanup(&current))
            .await;
        report_batch(kind, id, outcome)
    }
}

fn report_batch(kind: EntityKind, id: i64, outcome: BatchOutcome) -> EventReport {
    if !outcome.success {
        let failed = outcome.failures().count();
        error!(
            "{} {}: {} of {} barcode action(s) failed",
            kind,
            id,
            failed,
            outcome.outcomes.len()
        );
    }
    EventReport::Reconciled { kind, id, outcome }
}
