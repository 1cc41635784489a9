//! # Domain Layer
//!
//! Pure wire-format logic for label tokens.
//!
//! - `alphabet` - 32-symbol block encoding
//! - `context` - `(subject, domain)` binding of the IV
//! - `packet` - nonce/ciphertext/tag layout

pub mod alphabet;
pub mod context;
pub mod packet;
