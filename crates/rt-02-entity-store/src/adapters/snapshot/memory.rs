use super::collapse_latest;
use crate::domain::entity::Entity;
use crate::domain::errors::SnapshotError;
use crate::domain::identifier::EntityKind;
use crate::ports::outbound::SnapshotStore;
use std::collections::HashMap;

/// In-memory snapshot store for unit tests.
///
/// Keeps every appended record, like the line-delimited files do.
#[derive(Debug, Default, Clone)]
pub struct InMemorySnapshotStore {
    collections: HashMap<EntityKind, Vec<Entity>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw appended records for a kind, duplicates included.
    pub fn records(&self, kind: EntityKind) -> &[Entity] {
        self.collections
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, kind: EntityKind) -> Result<Vec<Entity>, SnapshotError> {
        Ok(collapse_latest(self.records(kind).iter().cloned()))
    }

    fn append_all(&mut self, kind: EntityKind, entities: &[Entity]) -> Result<(), SnapshotError> {
        self.collections
            .entry(kind)
            .or_default()
            .extend_from_slice(entities);
        Ok(())
    }
}
