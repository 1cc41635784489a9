//! # Ports Layer
//!
//! Port traits for the Entity Store subsystem.
//!
//! - `outbound.rs` - Driven ports (clock, class registry, snapshot storage)

pub mod outbound;
