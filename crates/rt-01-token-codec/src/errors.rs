//! Codec error types.

use thiserror::Error;

/// Token codec errors.
///
/// `decode` only ever returns [`CodecError::AuthenticationFailure`]: a
/// malformed block and a forged tag are indistinguishable to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Token is malformed or its tag did not verify.
    #[error("Token authentication failed")]
    AuthenticationFailure,

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Key material could not be parsed.
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Subject or domain unusable for minting.
    #[error("Invalid token context: {0}")]
    InvalidContext(String),

    /// No domain configured.
    #[error("Codec configuration has no accepted domain")]
    NoDomain,

    /// Encryption failed
    #[error("Encryption failed")]
    EncryptionFailed,
}
