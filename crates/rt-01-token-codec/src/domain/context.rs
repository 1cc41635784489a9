//! # Token Context
//!
//! Binds a token to a `(subject, domain)` pair without per-pair keys.
//!
//! The first 3 bytes of `SHA-256(subject ‖ domain)` become the leading bytes
//! of the 12-byte IV. The context part is not secret; it only makes a packet
//! minted for one pair fail tag verification under any other pair.

use sha2::{Digest, Sha256};

/// Length of the hash-derived IV segment.
pub const CONTEXT_PART_LEN: usize = 3;

/// Domain/subject pair a token is minted for.
///
/// Both values travel in clear text inside the token and are never treated
/// as secret or as trusted input on decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenContext {
    /// Issuing domain, e.g. `ECK1.COM`.
    pub domain: String,
    /// Subject suffix, e.g. `M3A`.
    pub subject: String,
}

impl TokenContext {
    /// Create a context.
    pub fn new(domain: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subject: subject.into(),
        }
    }

    /// First bytes of `SHA-256(subject ‖ domain)`.
    pub fn context_part(&self) -> [u8; CONTEXT_PART_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(self.subject.as_bytes());
        hasher.update(self.domain.as_bytes());
        let digest = hasher.finalize();

        let mut part = [0u8; CONTEXT_PART_LEN];
        part.copy_from_slice(&digest[..CONTEXT_PART_LEN]);
        part
    }
}
