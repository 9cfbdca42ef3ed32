//! Pure reconciliation logic.
//!
//! Given the identifier an entity should be reachable by and the barcodes
//! the registry currently links to it, decide what to unlink and what to
//! link. No I/O happens here.
//!
//! Unlinks always come before the link, so a registry enforcing global
//! uniqueness of barcode data never holds both bindings at once.

use quickbarcode_types::{BarcodeRecord, EntityRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a reconciliation produced no mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The entity has no IPN / serial.
    NoIdentifier,
    /// The identifier is already linked to the entity.
    AlreadyLinked,
    /// A deleted entity had no barcodes left to remove.
    NothingLinked,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoIdentifier => f.write_str("no identifier"),
            SkipReason::AlreadyLinked => f.write_str("already linked"),
            SkipReason::NothingLinked => f.write_str("no linked barcodes"),
        }
    }
}

/// One step of a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    Skip(SkipReason),
    /// Remove the registry entry for this barcode data.
    Unlink(String),
    /// Link this barcode data to the entity being reconciled.
    Link(String),
}

impl Action {
    /// Whether executing the action touches the registry.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::Skip(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Skip(reason) => write!(f, "skip ({reason})"),
            Action::Unlink(barcode) => write!(f, "unlink '{barcode}'"),
            Action::Link(barcode) => write!(f, "link '{barcode}'"),
        }
    }
}

/// A reconciliation for one entity, built fresh per event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileRequest {
    pub entity: EntityRef,
    pub unlink_others: bool,
}

impl ReconcileRequest {
    pub fn new(entity: EntityRef, unlink_others: bool) -> Self {
        Self {
            entity,
            unlink_others,
        }
    }

    /// Computes the actions against the given registry state.
    pub fn plan(&self, current: &[BarcodeRecord]) -> Vec<Action> {
        reconcile(&self.entity, current, self.unlink_others)
    }
}

/// Computes the actions that bring `current` to the desired state.
///
/// Returns a single `Skip` when the entity has no identifier or the
/// identifier is already linked. Otherwise returns the unlinks of every
/// non-matching record (only with `unlink_others`, in received order)
/// followed by one `Link`.
pub fn reconcile(desired: &EntityRef, current: &[BarcodeRecord], unlink_others: bool) -> Vec<Action> {
    let Some(identifier) = desired.identifier() else {
        return vec![Action::Skip(SkipReason::NoIdentifier)];
    };

    let (matching, others): (Vec<&BarcodeRecord>, Vec<&BarcodeRecord>) = current
        .iter()
        .partition(|record| record.barcode_data == identifier);

    if !matching.is_empty() {
        return vec![Action::Skip(SkipReason::AlreadyLinked)];
    }

    let mut actions = Vec::with_capacity(others.len() + 1);
    if unlink_others {
        actions.extend(
            others
                .into_iter()
                .map(|record| Action::Unlink(record.barcode_data.clone())),
        );
    }
    actions.push(Action::Link(identifier.to_string()));
    actions
}

/// Unlinks every record, for an entity that no longer exists.
pub fn plan_cleanup(current: &[BarcodeRecord]) -> Vec<Action> {
    if current.is_empty() {
        return vec![Action::Skip(SkipReason::NothingLinked)];
    }
    current
        .iter()
        .map(|record| Action::Unlink(record.barcode_data.clone()))
        .collect()
}
