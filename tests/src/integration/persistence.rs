//! # Persistence
//!
//! Scan results flushed to JSON-lines snapshots and restored into a fresh
//! store.

#[cfg(test)]
mod tests {
    use crate::benchmarks::station;
    use rt_02_entity_store::{
        EntityKind, EntityStore, EventField, Identifier, JsonLinesSnapshotStore, SnapshotStore,
    };
    use rt_03_scan_dispatch::ScanContext;

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_flush_and_restore_preserves_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshots = JsonLinesSnapshotStore::new(dir.path());
        let station = station();
        let mut ctx = ScanContext::default();

        station.submit(&mut ctx, "i000000000000000001").unwrap();
        station.submit(&mut ctx, "b000000000000000001").unwrap();
        ctx.store.flush(&mut snapshots).unwrap();

        station.clock().advance(60_000);
        station.submit(&mut ctx, "i000000000000000001").unwrap();
        station.submit(&mut ctx, "b000000000000000002").unwrap();
        ctx.store.flush(&mut snapshots).unwrap();

        let mut restored = EntityStore::new();
        restored.restore(&snapshots).unwrap();

        let item = restored.get(&id("i000000000000000001")).unwrap();
        assert_eq!(item.log(EventField::Loc).len(), 2);
        assert_eq!(item.location(), Some(id("b000000000000000002")));
        assert_eq!(item.created_at(), 1_000);
        assert!(restored
            .contents(&id("b000000000000000001"))
            .unwrap()
            .is_empty());

        // Items file holds both appended versions; load keeps the latest.
        let raw = std::fs::read_to_string(snapshots.path_for(EntityKind::Item)).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert_eq!(snapshots.load(EntityKind::Item).unwrap().len(), 1);
    }

    #[test]
    fn test_restored_store_keeps_scanning() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshots = JsonLinesSnapshotStore::new(dir.path());
        let station = station();

        let mut ctx = ScanContext::default();
        station.submit(&mut ctx, "b000000000000000004").unwrap();
        ctx.store.flush(&mut snapshots).unwrap();

        let mut store = EntityStore::new();
        store.restore(&snapshots).unwrap();
        let mut ctx = ScanContext::new(store);

        station.submit(&mut ctx, "i000000000000000009").unwrap();
        station.submit(&mut ctx, "b000000000000000004").unwrap();
        assert_eq!(ctx.store.dirty_count(), 2);
        assert_eq!(
            ctx.store.full_path(&id("i000000000000000009")).unwrap(),
            vec![id("i000000000000000009"), id("b000000000000000004")]
        );
    }
}
