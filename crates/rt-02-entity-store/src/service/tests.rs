//! # Entity Store Tests

use super::*;
use crate::adapters::{InMemoryClassRegistry, InMemorySnapshotStore};
use crate::domain::errors::SnapshotError;
use crate::ports::outbound::SnapshotStore;

fn id(s: &str) -> Identifier {
    s.parse().unwrap()
}

const ITEM: &str = "i000000000000000042";
const ITEM2: &str = "i000000000000000043";
const BOX: &str = "b000000000000000007";
const PLACE: &str = "p000000000000000003";
const ORDER: &str = "o000000000000000100";

// =============================================================================
// CREATION
// =============================================================================

#[test]
fn test_get_or_create_is_idempotent() {
    let mut store = EntityStore::new();

    let (entity, created) = store.get_or_create(id(ITEM), 1000);
    assert!(created);
    assert_eq!(entity.sn, (id(ITEM), 1000));

    let (entity, created) = store.get_or_create(id(ITEM), 2000);
    assert!(!created);
    assert_eq!(entity.created_at(), 1000);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_require_unknown() {
    let store = EntityStore::new();
    assert_eq!(
        store.require(&id(ITEM)),
        Err(StoreError::UnknownEntity { id: id(ITEM) })
    );
}

#[test]
fn test_entities_of_kind() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);
    store.upsert(id(ITEM2), 1);
    store.upsert(id(BOX), 1);

    assert_eq!(store.entities_of(EntityKind::Item).count(), 2);
    assert_eq!(store.entities_of(EntityKind::Box).count(), 1);
    assert_eq!(store.entities_of(EntityKind::User).count(), 0);
}

// =============================================================================
// EVENT LOGS
// =============================================================================

#[test]
fn test_append_event_is_append_only() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);

    store
        .append_event(&id(ITEM), EventField::Desc, vec!["scratched".into()], 2)
        .unwrap();
    store
        .append_event(&id(ITEM), EventField::Desc, vec!["dented".into()], 3)
        .unwrap();

    let entity = store.get(&id(ITEM)).unwrap();
    let log = entity.log(EventField::Desc);
    assert_eq!(log.len(), 2);
    assert_eq!(log[0], LogEntry::new(vec!["scratched".into()], 2));
    assert_eq!(entity.current(EventField::Desc).unwrap().at, 3);
}

#[test]
fn test_append_event_unknown_entity() {
    let mut store = EntityStore::new();
    let err = store
        .append_event(&id(ITEM), EventField::Mas, vec!["2kg".into()], 1)
        .unwrap_err();
    assert_eq!(err, StoreError::UnknownEntity { id: id(ITEM) });
}

#[test]
fn test_append_event_rejects_structural_fields() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);
    let err = store
        .append_event(&id(ITEM), EventField::Loc, vec![BOX.into()], 2)
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::ReservedField {
            field: EventField::Loc
        }
    );
}

#[test]
fn test_append_event_field_not_applicable() {
    let mut store = EntityStore::new();
    let user = id("u000000000000000001");
    store.upsert(user, 1);
    let err = store
        .append_event(&user, EventField::Desc, vec!["x".into()], 2)
        .unwrap_err();
    assert!(matches!(err, StoreError::FieldNotApplicable { .. }));
}

// =============================================================================
// CLASS BINDING
// =============================================================================

#[test]
fn test_rebind_class_keeps_sn_and_history() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);
    store
        .append_event(&id(ITEM), EventField::Brc, vec!["123".into()], 2)
        .unwrap();

    assert!(store
        .rebind_class(&id(ITEM), ClassId::new("laptop"), 3)
        .unwrap());
    assert!(store
        .rebind_class(&id(ITEM), ClassId::new("tablet"), 4)
        .unwrap());

    let entity = store.get(&id(ITEM)).unwrap();
    assert_eq!(entity.sn, (id(ITEM), 1));
    assert_eq!(entity.class_ref, Some(ClassId::new("tablet")));
    assert_eq!(entity.log(EventField::Brc).len(), 1);
    assert_eq!(entity.log(EventField::Cls).len(), 2);
}

#[test]
fn test_rebind_class_idempotent() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);

    assert!(store.rebind_class(&id(ITEM), ClassId::new("c"), 2).unwrap());
    assert!(!store.rebind_class(&id(ITEM), ClassId::new("c"), 3).unwrap());
    assert_eq!(store.get(&id(ITEM)).unwrap().log(EventField::Cls).len(), 1);
}

#[test]
fn test_rebind_class_items_only() {
    let mut store = EntityStore::new();
    store.upsert(id(BOX), 1);
    let err = store
        .rebind_class(&id(BOX), ClassId::new("c"), 2)
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::WrongKind {
            id: id(BOX),
            expected: EntityKind::Item
        }
    );
}

#[test]
fn test_class_resolved_at_read_time() {
    let mut registry = InMemoryClassRegistry::new();
    registry.register(ClassId::new("laptop"), "Laptop", ["EAN1"]);

    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);
    assert!(store.class_of(&id(ITEM), &registry).is_none());

    store
        .rebind_class(&id(ITEM), ClassId::new("laptop"), 2)
        .unwrap();
    assert_eq!(store.class_of(&id(ITEM), &registry).unwrap().name, "Laptop");
}

// =============================================================================
// CONTAINMENT
// =============================================================================

#[test]
fn test_link_writes_edge_pair() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);
    store.upsert(id(BOX), 1);

    store.link(&id(ITEM), &id(BOX), 50).unwrap();

    let item = store.get(&id(ITEM)).unwrap();
    let bx = store.get(&id(BOX)).unwrap();
    assert_eq!(item.log(EventField::Loc), &[LogEntry::new(vec![BOX.into()], 50)]);
    assert_eq!(bx.log(EventField::Cont), &[LogEntry::new(vec![ITEM.into()], 50)]);
}

#[test]
fn test_link_box_into_order_uses_in() {
    let mut store = EntityStore::new();
    store.upsert(id(BOX), 1);
    store.upsert(id(ORDER), 1);

    store.link(&id(BOX), &id(ORDER), 9).unwrap();

    let bx = store.get(&id(BOX)).unwrap();
    assert_eq!(bx.order(), Some(id(ORDER)));
    assert!(bx.log(EventField::Loc).is_empty());
    assert_eq!(store.contents(&id(ORDER)).unwrap(), vec![id(BOX)]);
}

#[test]
fn test_link_rejects_invalid_pairs() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);
    store.upsert(id(ORDER), 1);
    store.upsert(id(PLACE), 1);
    store.upsert(id(BOX), 1);

    assert!(matches!(
        store.link(&id(ITEM), &id(ORDER), 2),
        Err(StoreError::InvalidContainment { .. })
    ));
    assert!(matches!(
        store.link(&id(PLACE), &id(BOX), 2),
        Err(StoreError::InvalidContainment { .. })
    ));
}

#[test]
fn test_link_unknown_endpoints() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);
    assert_eq!(
        store.link(&id(ITEM), &id(BOX), 2),
        Err(StoreError::UnknownContainer { id: id(BOX) })
    );

    store.upsert(id(BOX), 1);
    assert_eq!(
        store.link(&id(ITEM2), &id(BOX), 2),
        Err(StoreError::UnknownChild { id: id(ITEM2) })
    );
    assert!(store.get(&id(BOX)).unwrap().log(EventField::Cont).is_empty());
}

#[test]
fn test_full_path_follows_latest_loc() {
    let mut store = EntityStore::new();
    let other_box = id("b000000000000000008");
    for s in [ITEM, BOX, PLACE] {
        store.upsert(id(s), 1);
    }
    store.upsert(other_box, 1);

    store.link(&id(ITEM), &other_box, 10).unwrap();
    store.link(&id(ITEM), &id(BOX), 20).unwrap();
    store.link(&id(BOX), &id(PLACE), 30).unwrap();

    assert_eq!(
        store.full_path(&id(ITEM)).unwrap(),
        vec![id(ITEM), id(BOX), id(PLACE)]
    );
    assert_eq!(store.full_path(&other_box).unwrap(), vec![other_box]);
}

#[test]
fn test_contents_is_live_view() {
    let mut store = EntityStore::new();
    let other_box = id("b000000000000000008");
    for s in [ITEM, ITEM2, BOX] {
        store.upsert(id(s), 1);
    }
    store.upsert(other_box, 1);

    store.link(&id(ITEM), &id(BOX), 10).unwrap();
    store.link(&id(ITEM2), &id(BOX), 10).unwrap();
    store.link(&id(ITEM), &other_box, 20).unwrap();

    assert_eq!(store.contents(&id(BOX)).unwrap(), vec![id(ITEM2)]);
    assert_eq!(store.contents(&other_box).unwrap(), vec![id(ITEM)]);
    assert_eq!(
        store.get(&id(BOX)).unwrap().log(EventField::Cont).len(),
        2
    );
}

// =============================================================================
// PERSISTENCE
// =============================================================================

#[test]
fn test_flush_writes_only_dirty() {
    let mut store = EntityStore::new();
    let mut snapshots = InMemorySnapshotStore::new();
    store.upsert(id(ITEM), 1);
    store.upsert(id(BOX), 1);

    assert_eq!(store.flush(&mut snapshots).unwrap(), 2);
    assert_eq!(store.dirty_count(), 0);
    assert_eq!(store.flush(&mut snapshots).unwrap(), 0);

    store
        .append_event(&id(BOX), EventField::Desc, vec!["blue".into()], 5)
        .unwrap();
    assert_eq!(store.flush(&mut snapshots).unwrap(), 1);
    assert_eq!(snapshots.records(EntityKind::Box).len(), 2);
}

#[test]
fn test_restore_roundtrip() {
    let mut store = EntityStore::new();
    let mut snapshots = InMemorySnapshotStore::new();
    store.upsert(id(ITEM), 1);
    store.upsert(id(BOX), 1);
    store.link(&id(ITEM), &id(BOX), 7).unwrap();
    store.flush(&mut snapshots).unwrap();

    let mut restored = EntityStore::new();
    assert_eq!(restored.restore(&snapshots).unwrap(), 2);
    assert_eq!(restored.dirty_count(), 0);
    assert_eq!(restored.get(&id(ITEM)), store.get(&id(ITEM)));
    assert_eq!(restored.full_path(&id(ITEM)).unwrap(), vec![id(ITEM), id(BOX)]);
}

struct FailingSnapshots;

impl SnapshotStore for FailingSnapshots {
    fn load(&self, _kind: EntityKind) -> Result<Vec<Entity>, SnapshotError> {
        Ok(Vec::new())
    }

    fn append_all(&mut self, _kind: EntityKind, _e: &[Entity]) -> Result<(), SnapshotError> {
        Err(SnapshotError::IOError {
            message: "disk full".into(),
        })
    }
}

#[test]
fn test_failed_flush_keeps_dirty() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);
    store.upsert(id(BOX), 1);

    assert!(matches!(
        store.flush(&mut FailingSnapshots),
        Err(StoreError::Snapshot(_))
    ));
    assert_eq!(store.dirty_count(), 2);
}

#[test]
fn test_drain_and_mark_dirty() {
    let mut store = EntityStore::new();
    store.upsert(id(ITEM), 1);

    let batch = store.drain_dirty();
    assert_eq!(batch[&EntityKind::Item].len(), 1);
    assert_eq!(store.dirty_count(), 0);

    store.mark_dirty(&batch);
    assert_eq!(store.dirty_count(), 1);
}
