//! # Scan Flows
//!
//! Label tokens printed by one station, scanned back through the full
//! pipeline:
//!
//! ```text
//! mint_label ──→ token ──→ submit ──→ buffers ──→ drain ──→ loc/in + cont
//! ```

#[cfg(test)]
mod tests {
    use crate::benchmarks::{ids, station, PHONE_EAN};
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use rt_02_entity_store::{ClassId, EntityKind, EventField, Identifier, LogEntry};
    use rt_03_scan_dispatch::{Outcome, ScanContext, ScanSource, ScannedCode};
    use std::sync::Arc;

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_two_labelled_items_into_box() {
        let station = station();
        let mut ctx = ScanContext::default();

        let item_42 = station.mint_label(&id("i000000000000000042")).unwrap();
        let item_43 = station.mint_label(&id("i000000000000000043")).unwrap();
        let bx = station.mint_label(&id("b000000000000000007")).unwrap();

        station.submit(&mut ctx, &item_42).unwrap();
        station.submit(&mut ctx, &item_43).unwrap();
        station.clock().set(7_000);
        station.submit(&mut ctx, &bx).unwrap();

        let stored_box = ctx.store.get(&id("b000000000000000007")).unwrap();
        assert_eq!(
            stored_box.log(EventField::Cont),
            &[
                LogEntry::new(vec!["i000000000000000042".into()], 7_000),
                LogEntry::new(vec!["i000000000000000043".into()], 7_000),
            ]
        );
        for item in ["i000000000000000042", "i000000000000000043"] {
            assert_eq!(
                ctx.store.get(&id(item)).unwrap().log(EventField::Loc),
                &[LogEntry::new(vec!["b000000000000000007".into()], 7_000)]
            );
        }
    }

    #[test]
    fn test_full_workflow_item_box_place_order() {
        let station = station();
        let mut ctx = ScanContext::default();

        for scan in [
            "i000000000000000001",
            PHONE_EAN,
            "= 2.5 kg",
            "b000000000000000001",
            "p000000000000000001",
        ] {
            if let Some(text) = scan.strip_prefix('=') {
                station.annotate(&mut ctx, text).unwrap();
            } else {
                station.submit(&mut ctx, scan).unwrap();
            }
            station.clock().advance(10);
        }

        let item = ctx.store.get(&id("i000000000000000001")).unwrap();
        assert_eq!(item.class_ref, Some(ClassId::new("phone")));
        assert_eq!(
            item.current(EventField::Mas).unwrap().values,
            vec!["2.5", "kg"]
        );
        assert_eq!(
            ctx.store.full_path(&id("i000000000000000001")).unwrap(),
            vec![
                id("i000000000000000001"),
                id("b000000000000000001"),
                id("p000000000000000001")
            ]
        );

        // The place drained the box; rescanning buffers it again for an order.
        station.submit(&mut ctx, "b000000000000000001").unwrap();
        let outcome = station.submit(&mut ctx, "o000000000000000009").unwrap();
        assert!(matches!(
            outcome,
            Outcome::Drained { ref committed, .. } if *committed == vec![id("b000000000000000001")]
        ));
        assert_eq!(
            ctx.store.contents(&id("o000000000000000009")).unwrap(),
            vec![id("b000000000000000001")]
        );
        // Order association does not move the box.
        assert_eq!(
            ctx.store
                .get(&id("b000000000000000001"))
                .unwrap()
                .location(),
            Some(id("p000000000000000001"))
        );
    }

    #[test]
    fn test_moving_item_updates_live_view_only() {
        let station = station();
        let mut ctx = ScanContext::default();

        station.submit(&mut ctx, "i000000000000000005").unwrap();
        station.submit(&mut ctx, "b000000000000000001").unwrap();
        station.clock().advance(100);
        station.submit(&mut ctx, "i000000000000000005").unwrap();
        station.submit(&mut ctx, "b000000000000000002").unwrap();

        let item = ctx.store.get(&id("i000000000000000005")).unwrap();
        assert_eq!(item.log(EventField::Loc).len(), 2);
        assert!(ctx
            .store
            .contents(&id("b000000000000000001"))
            .unwrap()
            .is_empty());
        assert_eq!(
            ctx.store.contents(&id("b000000000000000002")).unwrap(),
            vec![id("i000000000000000005")]
        );
    }

    #[test]
    fn test_token_and_plain_scans_are_the_same_entity() {
        let station = station();
        let mut ctx = ScanContext::default();
        let token = station.mint_label(&id("i000000000000000077")).unwrap();

        assert!(matches!(
            station.resolve(&token),
            ScannedCode::Entity {
                source: ScanSource::Token,
                ..
            }
        ));
        station.submit(&mut ctx, &token).unwrap();
        station.submit(&mut ctx, "I000000000000000077").unwrap();
        station.submit(&mut ctx, "0000077").unwrap();

        assert_eq!(ctx.store.len(), 1);
        assert_eq!(ctx.pending(EntityKind::Item), vec![id("i000000000000000077")]);
    }

    #[test]
    fn test_serialized_submits_from_many_scanners() {
        let station = Arc::new(station());
        let ctx = Arc::new(Mutex::new(ScanContext::default()));

        let handles: Vec<_> = (0..4u64)
            .map(|scanner| {
                let station = Arc::clone(&station);
                let ctx = Arc::clone(&ctx);
                std::thread::spawn(move || {
                    for n in 0..25 {
                        let item = format!("i{:018}", scanner * 100 + n);
                        station.submit(&mut ctx.lock(), &item).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut ctx = ctx.lock();
        station.submit(&mut ctx, "b000000000000000001").unwrap();
        assert_eq!(
            ctx.store.contents(&id("b000000000000000001")).unwrap().len(),
            100
        );
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// N item scans then one box scan: `cont` grows by exactly N and
        /// every pair shares its timestamp.
        #[test]
        fn prop_drain_completeness(
            serials in proptest::collection::btree_set(1u64..1_000_000, 1..40),
            rescans in proptest::collection::vec(any::<proptest::sample::Index>(), 0..20),
            box_serial in 1u64..1_000,
        ) {
            let station = station();
            let mut ctx = ScanContext::default();
            let items: Vec<Identifier> = serials
                .iter()
                .filter_map(|s| Identifier::new(EntityKind::Item, *s).ok())
                .collect();

            for item in &items {
                station.submit(&mut ctx, &item.to_string()).unwrap();
            }
            // Toggle some entries; flags never change what is drained.
            for index in &rescans {
                let item = index.get(&items);
                station.submit(&mut ctx, &item.to_string()).unwrap();
            }

            let bx = ids(EntityKind::Box, box_serial, 1)[0];
            let before = ctx
                .store
                .get(&bx)
                .map(|b| b.log(EventField::Cont).len())
                .unwrap_or(0);
            station.clock().advance(1);
            station.submit(&mut ctx, &bx.to_string()).unwrap();

            let stored_box = ctx.store.get(&bx).unwrap();
            let cont = stored_box.log(EventField::Cont);
            prop_assert_eq!(cont.len() - before, items.len());

            for item in &items {
                let loc = ctx.store.get(item).unwrap().current(EventField::Loc).unwrap();
                prop_assert_eq!(loc.target(), Some(bx));
                let pair = cont
                    .iter()
                    .find(|e| e.target() == Some(*item))
                    .unwrap();
                prop_assert_eq!(pair.at, loc.at);
            }
            prop_assert!(ctx.pending(EntityKind::Item).is_empty());
        }
    }
}
