//! # Scan Resolution
//!
//! A raw scan is resolved in this order:
//!
//! 1. Full-length authenticated token (decoded by the codec)
//! 2. Fixed-width numeric short code, expanded to an identifier
//! 3. Plain identifier text (first character case-insensitive)
//! 4. Opaque raw barcode
//!
//! Steps 2 and 3 live here; the token step needs the codec and is driven
//! by the dispatcher.

use crate::domain::value_objects::DispatchConfig;
use rt_02_entity_store::Identifier;

/// How an identifier was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSource {
    Token,
    ShortCode,
    Plain,
}

/// A resolved scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannedCode {
    /// A typed identifier.
    Entity { id: Identifier, source: ScanSource },
    /// Anything else, kept as scanned (trimmed).
    Raw(String),
}

/// Expand a short code: exactly `width` ASCII digits.
pub fn parse_short_code(raw: &str, config: &DispatchConfig) -> Option<Identifier> {
    if raw.len() != config.short_code_width || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let serial = raw.parse().ok()?;
    Identifier::new(config.short_code_kind, serial).ok()
}

/// Parse a plain identifier, ignoring the case of the type tag.
pub fn parse_plain(raw: &str) -> Option<Identifier> {
    let mut chars = raw.chars();
    let tag = chars.next()?.to_ascii_lowercase();
    let mut canonical = String::with_capacity(raw.len());
    canonical.push(tag);
    canonical.push_str(chars.as_str());
    canonical.parse().ok()
}
