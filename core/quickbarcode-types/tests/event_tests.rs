use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quickbarcode_types::{EntityKind, EventKind, LifecycleEvent};

// ── Static routing table ────────────────────────────────────────

#[test]
fn known_event_names_route() {
    assert_eq!(EventKind::from_name("plugins_loaded"), EventKind::PluginsLoaded);
    assert_eq!(EventKind::from_name("part_part.saved"), EventKind::PartSaved);
    assert_eq!(EventKind::from_name("part_part.created"), EventKind::PartSaved);
    assert_eq!(EventKind::from_name("part_part.deleted"), EventKind::PartDeleted);
    assert_eq!(
        EventKind::from_name("stock_stockitem.created"),
        EventKind::StockItemSaved
    );
    assert_eq!(
        EventKind::from_name("stock_stockitem.saved"),
        EventKind::StockItemSaved
    );
    assert_eq!(
        EventKind::from_name("stock_stockitem.deleted"),
        EventKind::StockItemDeleted
    );
}

#[test]
fn unknown_event_name_is_kept() {
    assert_eq!(
        EventKind::from_name("build_build.completed"),
        EventKind::Unknown("build_build.completed".to_string())
    );
}

#[test]
fn entity_kind_of_events() {
    assert_eq!(EventKind::PartSaved.entity_kind(), Some(EntityKind::Part));
    assert_eq!(EventKind::PartDeleted.entity_kind(), Some(EntityKind::Part));
    assert_eq!(
        EventKind::StockItemSaved.entity_kind(),
        Some(EntityKind::StockItem)
    );
    assert_eq!(EventKind::PluginsLoaded.entity_kind(), None);
    assert_eq!(EventKind::Unknown("x".into()).entity_kind(), None);
}

#[test]
fn deletion_flag() {
    assert!(EventKind::PartDeleted.is_deletion());
    assert!(EventKind::StockItemDeleted.is_deletion());
    assert!(!EventKind::PartSaved.is_deletion());
    assert!(!EventKind::PluginsLoaded.is_deletion());
}

#[test]
fn saved_and_deleted_events_per_kind() {
    assert_eq!(EventKind::saved(EntityKind::Part), EventKind::PartSaved);
    assert_eq!(EventKind::deleted(EntityKind::Part), EventKind::PartDeleted);
    assert_eq!(EventKind::saved(EntityKind::StockItem), EventKind::StockItemSaved);
    assert_eq!(
        EventKind::deleted(EntityKind::StockItem),
        EventKind::StockItemDeleted
    );
    for kind in EntityKind::ALL {
        assert_eq!(EventKind::saved(kind).entity_kind(), Some(kind));
        assert!(EventKind::deleted(kind).is_deletion());
    }
}

#[test]
fn display_round_trips_through_table() {
    for kind in [
        EventKind::PluginsLoaded,
        EventKind::PartSaved,
        EventKind::PartDeleted,
        EventKind::StockItemSaved,
        EventKind::StockItemDeleted,
    ] {
        assert_eq!(EventKind::from_name(&kind.to_string()), kind);
    }
}

// ── LifecycleEvent ──────────────────────────────────────────────

#[test]
fn lifecycle_event_from_json() {
    let event = LifecycleEvent::from_json(r#"{"event":"part_part.saved","id":12}"#).unwrap();
    assert_eq!(event, LifecycleEvent::new("part_part.saved", Some(12)));
    assert_eq!(event.kind(), EventKind::PartSaved);
}

#[test]
fn lifecycle_event_id_is_optional() {
    let event = LifecycleEvent::from_json(r#"{"event":"plugins_loaded"}"#).unwrap();
    assert_eq!(event.id, None);
    assert_eq!(event.kind(), EventKind::PluginsLoaded);
}

#[test]
fn lifecycle_event_rejects_garbage() {
    assert!(LifecycleEvent::from_json("not json").is_err());
    assert!(LifecycleEvent::from_json(r#"{"id":1}"#).is_err());
}

proptest! {
    #[test]
    fn routing_never_panics(name in ".{0,64}") {
        let kind = EventKind::from_name(&name);
        if let EventKind::Unknown(kept) = kind {
            prop_assert_eq!(kept, name);
        }
    }
}
