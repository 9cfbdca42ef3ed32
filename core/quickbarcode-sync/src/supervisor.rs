//! Action execution.
//!
//! Runs an action list against the registry in order. Every action gets its
//! own outcome; a failure is recorded and the next action still runs.

use crate::reconciler::Action;
use quickbarcode_registry::BarcodeRegistry;
use quickbarcode_types::EntityRef;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of executing a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,
    pub success: bool,
    pub detail: String,
}

/// Result of executing a whole action list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub outcomes: Vec<ActionOutcome>,
    /// True iff no action failed.
    pub success: bool,
}

impl BatchOutcome {
    pub fn from_outcomes(outcomes: Vec<ActionOutcome>) -> Self {
        let success = outcomes.iter().all(|o| o.success);
        Self { outcomes, success }
    }

    /// Outcomes of the actions that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    /// Number of actions that reached the registry.
    pub fn mutations(&self) -> usize {
        self.outcomes.iter().filter(|o| o.action.is_mutation()).count()
    }
}

/// Applies action lists through a [`BarcodeRegistry`].
#[derive(Clone)]
pub struct ExecutionSupervisor {
    registry: Arc<dyn BarcodeRegistry>,
}

impl ExecutionSupervisor {
    pub fn new(registry: Arc<dyn BarcodeRegistry>) -> Self {
        Self { registry }
    }

    /// The registry the supervisor writes to.
    pub fn registry(&self) -> &Arc<dyn BarcodeRegistry> {
        &self.registry
    }

    /// Executes `actions` for `entity`, in order, never stopping early.
    pub async fn execute(&self, entity: &EntityRef, actions: Vec<Action>) -> BatchOutcome {
        let mut outcomes = Vec::with_capacity(actions.len());
        for action in actions {
            outcomes.push(self.apply(entity, action).await);
        }
        BatchOutcome::from_outcomes(outcomes)
    }

    async fn apply(&self, entity: &EntityRef, action: Action) -> ActionOutcome {
        let (success, detail) = match &action {
            Action::Skip(reason) => {
                debug!("Nothing to do for {}: {}", entity, reason);
                (true, reason.to_string())
            }
            Action::Unlink(barcode) => match self.registry.unlink(barcode).await {
                Ok(true) => {
                    info!("Removed barcode '{}' from {}", barcode, entity);
                    (true, "unlinked".to_string())
                }
                Ok(false) => {
                    warn!("Registry refused to remove barcode '{}' from {}", barcode, entity);
                    (false, "registry rejected unlink".to_string())
                }
                Err(e) => {
                    warn!("Failed to remove barcode '{}' from {}: {}", barcode, entity, e);
                    (false, e.to_string())
                }
            },
            Action::Link(barcode) => {
                match self.registry.link(barcode, entity.kind, entity.id).await {
                    Ok(true) => {
                        info!("Linked barcode '{}' to {}", barcode, entity);
                        (true, "linked".to_string())
                    }
                    Ok(false) => {
                        error!("Registry refused to link barcode '{}' to {}", barcode, entity);
                        (false, "registry rejected link".to_string())
                    }
                    Err(e) => {
                        error!("Failed to link barcode '{}' to {}: {}", barcode, entity, e);
                        (false, e.to_string())
                    }
                }
            }
        };

        ActionOutcome {
            action,
            success,
            detail,
        }
    }
}
