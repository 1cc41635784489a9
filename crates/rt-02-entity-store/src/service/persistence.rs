//! Snapshot restore and flush.
//!
//! Flushing is not transactional with individual mutations: anything
//! mutated after the last successful flush is lost on a crash.

use super::EntityStore;
use crate::domain::entity::Entity;
use crate::domain::errors::StoreError;
use crate::domain::identifier::EntityKind;
use crate::ports::outbound::SnapshotStore;
use std::collections::BTreeMap;

impl EntityStore {
    /// Load every collection, replacing in-memory records with the same id.
    ///
    /// Returns the number of records loaded. Restored records are clean.
    pub fn restore(&mut self, snapshots: &dyn SnapshotStore) -> Result<usize, StoreError> {
        let mut loaded = 0;
        for kind in EntityKind::ALL {
            for entity in snapshots.load(kind)? {
                self.dirty.remove(&entity.id());
                self.entities.insert(entity.id(), entity);
                loaded += 1;
            }
        }

        #[cfg(feature = "tracing-log")]
        tracing::info!("[rt-02] restored {} entities", loaded);

        Ok(loaded)
    }

    /// Number of entities mutated since the last flush.
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Take copies of every dirty entity, grouped by kind, and mark them clean.
    ///
    /// For hosts that write snapshots off the scan path. If the write fails,
    /// hand the batch back with [`EntityStore::mark_dirty`].
    pub fn drain_dirty(&mut self) -> BTreeMap<EntityKind, Vec<Entity>> {
        let mut batch: BTreeMap<EntityKind, Vec<Entity>> = BTreeMap::new();
        for id in std::mem::take(&mut self.dirty) {
            if let Some(entity) = self.entities.get(&id) {
                batch.entry(id.kind()).or_default().push(entity.clone());
            }
        }
        batch
    }

    /// Mark the entities of a failed batch dirty again.
    pub fn mark_dirty(&mut self, batch: &BTreeMap<EntityKind, Vec<Entity>>) {
        for entity in batch.values().flatten() {
            self.dirty.insert(entity.id());
        }
    }

    /// Append every dirty entity to `snapshots`.
    ///
    /// On failure the unwritten entities stay dirty. Returns the number of
    /// records written.
    pub fn flush(&mut self, snapshots: &mut dyn SnapshotStore) -> Result<usize, StoreError> {
        let batch = self.drain_dirty();
        let written = write_batch(snapshots, &batch).map_err(|(err, failed_from)| {
            for (kind, entities) in &batch {
                if *kind >= failed_from {
                    for entity in entities {
                        self.dirty.insert(entity.id());
                    }
                }
            }
            err
        })?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!("[rt-02] flushed {} records", written);

        Ok(written)
    }
}

/// Write a batch kind by kind. On error, reports the first kind not written.
pub fn write_batch(
    snapshots: &mut dyn SnapshotStore,
    batch: &BTreeMap<EntityKind, Vec<Entity>>,
) -> Result<usize, (StoreError, EntityKind)> {
    let mut written = 0;
    for (kind, entities) in batch {
        snapshots
            .append_all(*kind, entities)
            .map_err(|e| (StoreError::from(e), *kind))?;
        written += entities.len();
    }
    Ok(written)
}
