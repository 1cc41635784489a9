//! # Adapters Module
//!
//! Adapter implementations for the Entity Store subsystem.
//!
//! ## Modules
//!
//! - `infra`: System and manual clocks
//! - `registry`: In-memory class registry
//! - `snapshot`: In-memory and line-delimited JSON snapshot storage

pub mod infra;
pub mod registry;
pub mod snapshot;

pub use infra::{ManualClock, SystemTimeSource};
pub use registry::InMemoryClassRegistry;
pub use snapshot::{InMemorySnapshotStore, JsonLinesSnapshotStore};
