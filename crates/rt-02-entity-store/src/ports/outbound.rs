//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the Entity Store needs from the host application.

use crate::domain::entity::{Entity, Timestamp};
use crate::domain::errors::SnapshotError;
use crate::domain::identifier::{ClassId, EntityKind};

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in milliseconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Class metadata as held by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Stable class id stored on items.
    pub id: ClassId,
    /// Display name.
    pub name: String,
}

/// Abstract interface for the product class registry.
///
/// Items store only a [`ClassId`]; the class itself is resolved here at read
/// time, so rebinding never rewrites the item.
pub trait ClassRegistry: Send + Sync {
    /// Resolve a scanned code (EAN, part number) to a class.
    fn lookup(&self, code: &str) -> Option<ClassId>;

    /// Metadata for a class id.
    fn describe(&self, id: &ClassId) -> Option<ClassInfo>;
}

/// Abstract interface for snapshot persistence.
///
/// One line-delimited collection per entity kind. Records are appended;
/// when an id appears more than once the last record is the current one.
pub trait SnapshotStore: Send {
    /// Load the current record of every entity of `kind`.
    fn load(&self, kind: EntityKind) -> Result<Vec<Entity>, SnapshotError>;

    /// Append records to the `kind` collection.
    fn append_all(&mut self, kind: EntityKind, entities: &[Entity]) -> Result<(), SnapshotError>;
}
