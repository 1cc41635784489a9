//! # Wire Packet
//!
//! ```text
//! nonce(9) ‖ ciphertext(19) ‖ tag(12) = 40 bytes = 64 symbols
//! ```
//!
//! The tag is the GCM tag truncated to 96 bits. This is a property of the
//! wire format: forgery resistance is 2^-96 per attempt, traded for a label
//! that fits a small QR code.

use super::alphabet;
use super::context::CONTEXT_PART_LEN;

/// Payload length (1 type byte + 18 identifier bytes).
pub const PAYLOAD_LEN: usize = 19;

/// Random nonce length.
pub const NONCE_LEN: usize = 9;

/// Full IV length (context part + nonce).
pub const IV_LEN: usize = CONTEXT_PART_LEN + NONCE_LEN;

/// Transmitted tag length.
pub const TAG_LEN: usize = 12;

/// Packet length in bytes.
pub const PACKET_LEN: usize = NONCE_LEN + PAYLOAD_LEN + TAG_LEN;

/// Packet length in alphabet symbols.
pub const BLOCK_LEN: usize = alphabet::encoded_len(PACKET_LEN);

/// Fixed-size payload carried by a token.
pub type Payload = [u8; PAYLOAD_LEN];

/// Parsed wire packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirePacket {
    /// Per-token random nonce.
    pub nonce: [u8; NONCE_LEN],
    /// Encrypted payload.
    pub ciphertext: [u8; PAYLOAD_LEN],
    /// Truncated authentication tag.
    pub tag: [u8; TAG_LEN],
}

impl WirePacket {
    /// Serialize to the 64-symbol block.
    pub fn to_block(&self) -> String {
        let mut bytes = [0u8; PACKET_LEN];
        bytes[..NONCE_LEN].copy_from_slice(&self.nonce);
        bytes[NONCE_LEN..NONCE_LEN + PAYLOAD_LEN].copy_from_slice(&self.ciphertext);
        bytes[NONCE_LEN + PAYLOAD_LEN..].copy_from_slice(&self.tag);
        alphabet::encode(&bytes)
    }

    /// Parse a 64-symbol block. `None` on wrong length or foreign symbols.
    pub fn from_block(block: &str) -> Option<Self> {
        if block.len() != BLOCK_LEN {
            return None;
        }
        let bytes = alphabet::decode(block)?;
        if bytes.len() != PACKET_LEN {
            return None;
        }

        let mut nonce = [0u8; NONCE_LEN];
        let mut ciphertext = [0u8; PAYLOAD_LEN];
        let mut tag = [0u8; TAG_LEN];
        nonce.copy_from_slice(&bytes[..NONCE_LEN]);
        ciphertext.copy_from_slice(&bytes[NONCE_LEN..NONCE_LEN + PAYLOAD_LEN]);
        tag.copy_from_slice(&bytes[NONCE_LEN + PAYLOAD_LEN..]);

        Some(Self {
            nonce,
            ciphertext,
            tag,
        })
    }

    /// Rebuild the IV from a context part and this packet's nonce.
    pub fn iv(&self, context_part: &[u8; CONTEXT_PART_LEN]) -> [u8; IV_LEN] {
        let mut iv = [0u8; IV_LEN];
        iv[..CONTEXT_PART_LEN].copy_from_slice(context_part);
        iv[CONTEXT_PART_LEN..].copy_from_slice(&self.nonce);
        iv
    }
}
