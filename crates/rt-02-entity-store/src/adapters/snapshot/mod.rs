//! Snapshot Adapters
//!
//! Implementations of the `SnapshotStore` trait.

mod jsonl;
mod memory;

pub use jsonl::JsonLinesSnapshotStore;
pub use memory::InMemorySnapshotStore;

use crate::domain::entity::Entity;
use crate::domain::identifier::Identifier;
use std::collections::BTreeMap;

/// Keep the last record per id, ordered by id.
pub(crate) fn collapse_latest<I>(records: I) -> Vec<Entity>
where
    I: IntoIterator<Item = Entity>,
{
    let mut latest: BTreeMap<Identifier, Entity> = BTreeMap::new();
    for record in records {
        latest.insert(record.id(), record);
    }
    latest.into_values().collect()
}
