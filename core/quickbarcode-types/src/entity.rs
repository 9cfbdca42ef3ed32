//! Entity references and barcode records.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of inventory entity that carry a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A part, identified by its IPN.
    Part,
    /// A stock item, identified by its serial number.
    #[serde(rename = "stockitem")]
    StockItem,
}

impl EntityKind {
    /// All supported kinds.
    pub const ALL: [EntityKind; 2] = [EntityKind::Part, EntityKind::StockItem];

    /// The key the barcode registry uses for this kind, both as a query
    /// parameter on lookups and as the body field on link requests.
    #[must_use]
    pub const fn registry_key(self) -> &'static str {
        match self {
            EntityKind::Part => "part",
            EntityKind::StockItem => "stockitem",
        }
    }

    /// Path segment of the inventory detail endpoint (`/api/{segment}/{id}/`).
    #[must_use]
    pub const fn api_segment(self) -> &'static str {
        match self {
            EntityKind::Part => "part",
            EntityKind::StockItem => "stock",
        }
    }

    /// Name of the inventory field holding the canonical identifier.
    #[must_use]
    pub const fn identifier_field(self) -> &'static str {
        match self {
            EntityKind::Part => "IPN",
            EntityKind::StockItem => "serial",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Part => f.write_str("Part"),
            EntityKind::StockItem => f.write_str("StockItem"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "part" => Ok(EntityKind::Part),
            "stockitem" | "stock_item" | "stock" => Ok(EntityKind::StockItem),
            _ => Err(Error::UnknownEntityKind(s.to_string())),
        }
    }
}

/// An inventory entity together with its current canonical identifier.
///
/// The identifier is the part's IPN or the stock item's serial. An empty
/// identifier is stored as `None`: such an entity can't be linked. Any other
/// string, whitespace included, is kept verbatim. Only built through the
/// constructors, so the type serializes but never deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
    canonical_identifier: Option<String>,
}

impl EntityRef {
    /// Creates a reference, normalizing an empty identifier to `None`.
    pub fn new(kind: EntityKind, id: i64, identifier: Option<impl Into<String>>) -> Self {
        let canonical_identifier = identifier
            .map(Into::into)
            .filter(|s: &String| !s.is_empty());
        Self {
            kind,
            id,
            canonical_identifier,
        }
    }

    /// An entity without a canonical identifier.
    pub fn unidentified(kind: EntityKind, id: i64) -> Self {
        Self::new(kind, id, None::<String>)
    }

    /// Shorthand for a part with the given IPN.
    pub fn part(id: i64, ipn: impl Into<String>) -> Self {
        Self::new(EntityKind::Part, id, Some(ipn))
    }

    /// Shorthand for a stock item with the given serial.
    pub fn stock_item(id: i64, serial: impl Into<String>) -> Self {
        Self::new(EntityKind::StockItem, id, Some(serial))
    }

    /// The canonical identifier, if the entity has one.
    pub fn identifier(&self) -> Option<&str> {
        self.canonical_identifier.as_deref()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// A barcode currently linked to an entity in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarcodeRecord {
    pub barcode_data: String,
    pub kind: EntityKind,
    pub entity_id: i64,
}

impl BarcodeRecord {
    pub fn new(barcode_data: impl Into<String>, kind: EntityKind, entity_id: i64) -> Self {
        Self {
            barcode_data: barcode_data.into(),
            kind,
            entity_id,
        }
    }
}
