//! Containment edges and live-state path queries.

use super::EntityStore;
use crate::domain::entity::{EventField, LogEntry, Timestamp};
use crate::domain::errors::StoreError;
use crate::domain::identifier::{EntityKind, Identifier};

/// Child-side log for a `(child, container)` kind pair.
fn edge_field(child: EntityKind, container: EntityKind) -> Option<EventField> {
    use EntityKind as K;
    match (child, container) {
        (K::Item, K::Box) | (K::Item, K::Place) | (K::Box, K::Place) => Some(EventField::Loc),
        (K::Box, K::Order) => Some(EventField::In),
        _ => None,
    }
}

impl EntityStore {
    /// Place `child` into `container` at `now`.
    ///
    /// Writes `loc`/`in += [container, now]` on the child and
    /// `cont += [child, now]` on the container. Both must already exist.
    pub fn link(
        &mut self,
        child: &Identifier,
        container: &Identifier,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let field =
            edge_field(child.kind(), container.kind()).ok_or(StoreError::InvalidContainment {
                child: *child,
                container: *container,
            })?;
        if !self.contains(container) {
            return Err(StoreError::UnknownContainer { id: *container });
        }
        if !self.contains(child) {
            return Err(StoreError::UnknownChild { id: *child });
        }

        self.push_event(
            child,
            field,
            LogEntry::new(vec![container.to_string()], now),
        )?;
        self.push_event(
            container,
            EventField::Cont,
            LogEntry::new(vec![child.to_string()], now),
        )
    }

    /// Physical path from `id` outward: `[item, box, place]`.
    ///
    /// Follows only the latest `loc` entry at each level. This is the
    /// current position, not an audit of past moves.
    pub fn full_path(&self, id: &Identifier) -> Result<Vec<Identifier>, StoreError> {
        let mut current = self.require(id)?;
        let mut path = vec![*id];

        while let Some(next) = current.location() {
            if path.contains(&next) || path.len() >= EntityKind::ALL.len() {
                break;
            }
            path.push(next);
            match self.get(&next) {
                Some(entity) => current = entity,
                None => break,
            }
        }

        Ok(path)
    }

    /// Children whose latest location (or order) is still `container`.
    ///
    /// Order of first placement is preserved; children moved elsewhere
    /// since are left out.
    pub fn contents(&self, container: &Identifier) -> Result<Vec<Identifier>, StoreError> {
        let entity = self
            .get(container)
            .ok_or(StoreError::UnknownContainer { id: *container })?;

        let mut children: Vec<Identifier> = Vec::new();
        for entry in entity.log(EventField::Cont) {
            let Some(child) = entry.target() else {
                continue;
            };
            if children.contains(&child) {
                continue;
            }
            let still_here = self.get(&child).is_some_and(|c| {
                c.location() == Some(*container) || c.order() == Some(*container)
            });
            if still_here {
                children.push(child);
            }
        }

        Ok(children)
    }
}
