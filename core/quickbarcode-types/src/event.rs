//! Lifecycle notifications delivered by the inventory host.
//!
//! The host names events `<app>_<model>.<action>` (for example
//! `part_part.saved`). [`EventKind::from_name`] is the static routing table:
//! every name the engine reacts to maps to a variant, everything else lands
//! in [`EventKind::Unknown`] so new host events never break dispatch.

use crate::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A notification as received from the host: the event name and the primary
/// key of the affected entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub event: String,
    #[serde(default)]
    pub id: Option<i64>,
}

impl LifecycleEvent {
    pub fn new(event: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            event: event.into(),
            id,
        }
    }

    /// Parses a notification from its JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Routes the event name through the static table.
    pub fn kind(&self) -> EventKind {
        EventKind::from_name(&self.event)
    }
}

/// The event kinds the engine understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The host finished loading plugins.
    PluginsLoaded,
    /// A part was created or saved.
    PartSaved,
    /// A part was deleted.
    PartDeleted,
    /// A stock item was created or saved.
    StockItemSaved,
    /// A stock item was deleted.
    StockItemDeleted,
    /// Anything else. Ignored.
    Unknown(String),
}

impl EventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "plugins_loaded" => EventKind::PluginsLoaded,
            "part_part.created" | "part_part.saved" => EventKind::PartSaved,
            "part_part.deleted" => EventKind::PartDeleted,
            "stock_stockitem.created" | "stock_stockitem.saved" => EventKind::StockItemSaved,
            "stock_stockitem.deleted" => EventKind::StockItemDeleted,
            other => EventKind::Unknown(other.to_string()),
        }
    }

    /// The save event for an entity kind.
    pub fn saved(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Part => EventKind::PartSaved,
            EntityKind::StockItem => EventKind::StockItemSaved,
        }
    }

    /// The delete event for an entity kind.
    pub fn deleted(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Part => EventKind::PartDeleted,
            EntityKind::StockItem => EventKind::StockItemDeleted,
        }
    }

    /// The entity kind this event concerns, if any.
    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            EventKind::PartSaved | EventKind::PartDeleted => Some(EntityKind::Part),
            EventKind::StockItemSaved | EventKind::StockItemDeleted => {
                Some(EntityKind::StockItem)
            }
            EventKind::PluginsLoaded | EventKind::Unknown(_) => None,
        }
    }

    pub fn is_deletion(&self) -> bool {
        matches!(self, EventKind::PartDeleted | EventKind::StockItemDeleted)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::PluginsLoaded => f.write_str("plugins_loaded"),
            EventKind::PartSaved => f.write_str("part_part.saved"),
            EventKind::PartDeleted => f.write_str("part_part.deleted"),
            EventKind::StockItemSaved => f.write_str("stock_stockitem.saved"),
            EventKind::StockItemDeleted => f.write_str("stock_stockitem.deleted"),
            EventKind::Unknown(name) => f.write_str(name),
        }
    }
}
