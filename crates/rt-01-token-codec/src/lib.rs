//! # Token Codec (rt-01)
//!
//! Compact authenticated tokens for asset labels. A 19-byte typed payload
//! becomes a QR-printable string and back.
//!
//! ## Wire Format
//!
//! | Part | Size | Notes |
//! |------|------|-------|
//! | domain | variable | clear text, must be an accepted domain |
//! | `/` | 1 | separator |
//! | block | 64 symbols | `nonce(9) ‖ ciphertext(19) ‖ tag(12)` in the label alphabet |
//! | subject | fixed | clear text, feeds the IV context part |
//!
//! ## Security Properties
//!
//! - **AES-192-GCM**, 12-byte IV = `SHA-256(subject ‖ domain)[..3] ‖ random(9)`
//! - **96-bit tag**: truncated from 128 bits for label size; part of the format
//! - **Fail closed**: decode errors carry no payload and no reason
//!
//! The legacy 16-byte IV scheme (`nonce ‖ nonce[0..7]`) is not supported.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod domain;
pub mod errors;

// Re-exports
pub use codec::TokenCodec;
pub use config::{CodecConfig, CodecKey, KEY_LEN};
pub use domain::context::TokenContext;
pub use domain::packet::{Payload, BLOCK_LEN, PAYLOAD_LEN, TAG_LEN};
pub use errors::CodecError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
