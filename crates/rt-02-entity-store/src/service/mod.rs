//! # Entity Store Service
//!
//! In-memory keyed collection of every tracked entity.
//!
//! ## Guarantees
//!
//! 1. `sn` is written once, on first creation (idempotent upsert)
//! 2. Event logs are append-only; existing entries are never touched
//! 3. Containment writes both halves of an edge with one timestamp
//! 4. Mutations are synchronous and visible to the next read
//!
//! The store is not synchronized. Hosts that accept concurrent callers wrap
//! it, together with the scan session, behind a single lock.

mod containment;
mod persistence;
#[cfg(test)]
mod tests;

use crate::domain::entity::{Entity, EventField, LogEntry, Timestamp};
use crate::domain::errors::StoreError;
use crate::domain::identifier::{ClassId, EntityKind, Identifier};
use crate::ports::outbound::{ClassInfo, ClassRegistry};
use std::collections::{BTreeMap, BTreeSet};

pub use persistence::write_batch;

/// The Entity Store.
#[derive(Debug, Default)]
pub struct EntityStore {
    /// Every entity, ordered by identifier (grouped by kind).
    pub(crate) entities: BTreeMap<Identifier, Entity>,
    /// Entities mutated since the last flush.
    pub(crate) dirty: BTreeSet<Identifier>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether `id` exists.
    pub fn contains(&self, id: &Identifier) -> bool {
        self.entities.contains_key(id)
    }

    /// Look up without creating.
    pub fn get(&self, id: &Identifier) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Look up without creating; absence is an error.
    pub fn require(&self, id: &Identifier) -> Result<&Entity, StoreError> {
        self.entities
            .get(id)
            .ok_or(StoreError::UnknownEntity { id: *id })
    }

    /// Fetch `id`, creating it at `now` if absent.
    ///
    /// Returns the entity and whether this call created it. `sn` is only
    /// recorded on creation.
    pub fn get_or_create(&mut self, id: Identifier, now: Timestamp) -> (&Entity, bool) {
        let mut created = false;
        let entity = self.entities.entry(id).or_insert_with(|| {
            created = true;
            Entity::new(id, now)
        });

        if created {
            self.dirty.insert(id);

            #[cfg(feature = "tracing-log")]
            tracing::debug!(id = %id, "[rt-02] created {}", id.kind());
        }

        (entity, created)
    }

    /// Upsert and report whether the entity was created.
    pub fn upsert(&mut self, id: Identifier, now: Timestamp) -> bool {
        self.get_or_create(id, now).1
    }

    /// Append `[values…, now]` to a free-form or audit log of `id`.
    ///
    /// Containment and class logs are rejected here; they are written by
    /// [`EntityStore::link`] and [`EntityStore::rebind_class`].
    pub fn append_event(
        &mut self,
        id: &Identifier,
        field: EventField,
        values: Vec<String>,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        if field.is_structural() {
            return Err(StoreError::ReservedField { field });
        }
        self.push_event(id, field, LogEntry::new(values, now))
    }

    /// Bind an item to a class.
    ///
    /// Idempotent: rebinding to the current class changes nothing and
    /// returns `false`. Each real change appends a `cls` entry; `sn` and all
    /// earlier log entries are left as they were.
    pub fn rebind_class(
        &mut self,
        item: &Identifier,
        class: ClassId,
        now: Timestamp,
    ) -> Result<bool, StoreError> {
        if item.kind() != EntityKind::Item {
            return Err(StoreError::WrongKind {
                id: *item,
                expected: EntityKind::Item,
            });
        }
        let entity = self
            .entities
            .get_mut(item)
            .ok_or(StoreError::UnknownEntity { id: *item })?;

        if entity.class_ref.as_ref() == Some(&class) {
            return Ok(false);
        }

        entity.push(
            EventField::Cls,
            LogEntry::new(vec![class.as_str().to_string()], now),
        );
        entity.class_ref = Some(class);
        self.dirty.insert(*item);

        #[cfg(feature = "tracing-log")]
        tracing::info!(item = %item, "[rt-02] class rebound");

        Ok(true)
    }

    /// Resolve an item's class through the registry.
    pub fn class_of(&self, item: &Identifier, registry: &dyn ClassRegistry) -> Option<ClassInfo> {
        let class = self.entities.get(item)?.class_ref.as_ref()?;
        registry.describe(class)
    }

    /// All entities of one kind, in identifier order.
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values().filter(move |e| e.kind() == kind)
    }

    /// Append a log entry after checking applicability.
    pub(crate) fn push_event(
        &mut self,
        id: &Identifier,
        field: EventField,
        entry: LogEntry,
    ) -> Result<(), StoreError> {
        if !field.applies_to(id.kind()) {
            return Err(StoreError::FieldNotApplicable {
                kind: id.kind(),
                field,
            });
        }
        let entity = self
            .entities
            .get_mut(id)
            .ok_or(StoreError::UnknownEntity { id: *id })?;
        entity.push(field, entry);
        self.dirty.insert(*id);
        Ok(())
    }
}
