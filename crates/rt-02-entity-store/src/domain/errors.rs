//! # Domain Errors
//!
//! Error types for the Entity Store subsystem.
//!
//! Lookups that do not create must surface absence explicitly; the scan
//! path upserts, so `Unknown*` variants are rare in practice.

use crate::domain::entity::EventField;
use crate::domain::identifier::{EntityKind, Identifier};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Text is not a canonical identifier.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// No entity with this identifier.
    #[error("Unknown entity: {id}")]
    UnknownEntity { id: Identifier },

    /// Containment target absent.
    #[error("Unknown container: {id}")]
    UnknownContainer { id: Identifier },

    /// Containment child absent.
    #[error("Unknown child: {id}")]
    UnknownChild { id: Identifier },

    /// Operation requires a different kind.
    #[error("{id} is not of kind {expected}")]
    WrongKind { id: Identifier, expected: EntityKind },

    /// Log does not exist for this kind.
    #[error("Field {field} does not apply to {kind}")]
    FieldNotApplicable { kind: EntityKind, field: EventField },

    /// Log is written only by containment or class binding.
    #[error("Field {field} is written by containment or class binding only")]
    ReservedField { field: EventField },

    /// This child kind cannot be placed into this container kind.
    #[error("{child} cannot be placed into {container}")]
    InvalidContainment {
        child: Identifier,
        container: Identifier,
    },

    /// Snapshot storage failed.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Snapshot storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// I/O error during read/write.
    #[error("Snapshot I/O error: {message}")]
    IOError { message: String },

    /// Record could not be encoded.
    #[error("Snapshot encoding error: {message}")]
    EncodingError { message: String },
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::IOError {
            message: err.to_string(),
        }
    }
}
