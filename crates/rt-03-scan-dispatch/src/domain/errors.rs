//! # Domain Errors
//!
//! Error types for the Scan Dispatcher subsystem. Nothing here is fatal:
//! a failed scan leaves the session and store usable.

use rt_01_token_codec::CodecError;
use rt_02_entity_store::StoreError;
use thiserror::Error;

/// Errors returned by `submit` and `annotate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Entity store rejected a mutation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Free-text input with no active pending entry to apply it to.
    #[error("No active pending entry to annotate")]
    NoActiveTarget,
}

/// Dispatcher construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Short-code width outside `1..=max`.
    #[error("Short code width {width} must be between 1 and {max}")]
    ShortCodeWidth { width: usize, max: usize },

    /// Codec configuration rejected.
    #[error("Codec: {0}")]
    Codec(#[from] CodecError),
}
