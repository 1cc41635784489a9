//! # Domain Layer
//!
//! Pure domain logic for the Entity Store subsystem.
//!
//! ## Modules
//!
//! - `identifier` - Typed identifiers, entity kinds, class references
//! - `entity` - Entity records and append-only event logs
//! - `errors` - Domain error types

pub mod entity;
pub mod errors;
pub mod identifier;
