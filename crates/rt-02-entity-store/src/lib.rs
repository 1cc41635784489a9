//! # Entity Store (rt-02)
//!
//! Authoritative in-memory state for every tracked asset: items, boxes,
//! places, orders and users. Each entity is a serial record `sn` plus
//! append-only event logs; "current" values are derived from the last entry.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Immutable Serial | `sn` is set once on first creation |
//! | 2 | Append-Only Logs | Entries are never rewritten or removed |
//! | 3 | Edge Pairs | `loc`/`in` on the child and `cont` on the container share one timestamp |
//! | 4 | Live Paths | Paths and contents follow the latest entry only |
//! | 5 | Late Class Binding | Items store a class id; metadata is resolved at read time |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Identifiers, entity records, errors
//! - `ports/` - Outbound SPI (time, class registry, snapshots)
//! - `adapters/` - In-memory and line-delimited JSON implementations
//! - `service/` - The [`EntityStore`] itself
//!
//! ## Usage
//!
//! ```ignore
//! use rt_02_entity_store::{EntityStore, InMemorySnapshotStore};
//!
//! let mut store = EntityStore::new();
//! store.upsert(item, now);
//! store.upsert(bx, now);
//! store.link(&item, &bx, now)?;
//! assert_eq!(store.full_path(&item)?, vec![item, bx]);
//!
//! store.flush(&mut snapshots)?;
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{
    InMemoryClassRegistry, InMemorySnapshotStore, JsonLinesSnapshotStore, ManualClock,
    SystemTimeSource,
};
pub use domain::entity::{Entity, EventField, LogEntry, Timestamp};
pub use domain::errors::{SnapshotError, StoreError};
pub use domain::identifier::{ClassId, EntityKind, Identifier, IDENTIFIER_LEN, MAX_SERIAL};
pub use ports::outbound::{ClassInfo, ClassRegistry, SnapshotStore, TimeSource};
pub use service::{write_batch, EntityStore};
