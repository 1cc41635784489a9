//! # Codec Configuration
//!
//! Key material and the token contexts a codec accepts.

use crate::CodecError;
use zeroize::Zeroize;

/// AES-192 key length.
pub const KEY_LEN: usize = 24;

/// Default subject length.
pub const DEFAULT_SUBJECT_LEN: usize = 3;

/// Secret key (192-bit).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct CodecKey([u8; KEY_LEN]);

impl CodecKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != KEY_LEN {
            return Err(CodecError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Parse 48 hex characters.
    pub fn from_hex(text: &str) -> Result<Self, CodecError> {
        let mut bytes =
            hex::decode(text.trim()).map_err(|e| CodecError::InvalidKeyEncoding(e.to_string()))?;
        let key = Self::from_slice(&bytes);
        bytes.zeroize();
        key
    }

    /// Generate random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// All-zero placeholder key.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl std::fmt::Debug for CodecKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CodecKey(..)")
    }
}

/// Configuration for a [`crate::TokenCodec`].
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Shared AES-192 key.
    pub key: CodecKey,
    /// Domains accepted on decode. The first one is used for minting.
    pub domains: Vec<String>,
    /// Subject used for minting.
    pub subject: String,
    /// Fixed subject length; fixes the total token length.
    pub subject_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            key: CodecKey::from_bytes([0u8; KEY_LEN]), // MUST be overridden in production
            domains: vec!["ECK1.COM".to_string()],
            subject: "M3A".to_string(),
            subject_len: DEFAULT_SUBJECT_LEN,
        }
    }
}

impl CodecConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key.
    pub fn with_key(mut self, key: CodecKey) -> Self {
        self.key = key;
        self
    }

    /// Replace the accepted domains.
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Set the minting subject; the subject length follows it.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self.subject_len = self.subject.len();
        self
    }

    /// Minting domain.
    pub fn primary_domain(&self) -> Option<&str> {
        self.domains.first().map(String::as_str)
    }

    /// Check the configuration can mint tokens it will later accept.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.domains.is_empty() {
            return Err(CodecError::NoDomain);
        }
        for domain in &self.domains {
            validate_domain(domain)?;
        }
        validate_subject(&self.subject, self.subject_len)
    }
}

pub(crate) fn validate_domain(domain: &str) -> Result<(), CodecError> {
    if domain.is_empty() || domain.contains('/') || !domain.is_ascii() {
        return Err(CodecError::InvalidContext(format!(
            "domain {:?} must be non-empty ASCII without '/'",
            domain
        )));
    }
    Ok(())
}

pub(crate) fn validate_subject(subject: &str, subject_len: usize) -> Result<(), CodecError> {
    if subject.len() != subject_len || !subject.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(CodecError::InvalidContext(format!(
            "subject {:?} must be {} ASCII alphanumerics",
            subject, subject_len
        )));
    }
    Ok(())
}
