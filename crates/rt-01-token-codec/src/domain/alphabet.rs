//! # Label Alphabet
//!
//! 32-symbol alphabet, 5 bits per character, no padding. Every symbol is in
//! the QR alphanumeric set, and the letters that print ambiguously next to
//! digits (I, L, O, U) are left out.
//!
//! Bits are consumed most significant first, 5 source bytes per 8 symbols.

/// Symbols in value order.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Bytes per encoding group.
const GROUP_BYTES: usize = 5;

/// Symbols per encoding group.
const GROUP_CHARS: usize = 8;

/// Encoded length of `len` bytes. `len` must be a multiple of 5.
pub const fn encoded_len(len: usize) -> usize {
    len / GROUP_BYTES * GROUP_CHARS
}

/// Encode bytes whose length is a multiple of 5.
pub fn encode(bytes: &[u8]) -> String {
    debug_assert_eq!(bytes.len() % GROUP_BYTES, 0);

    let mut out = String::with_capacity(encoded_len(bytes.len()));
    for group in bytes.chunks(GROUP_BYTES) {
        let mut acc: u64 = 0;
        for b in group {
            acc = (acc << 8) | u64::from(*b);
        }
        for i in (0..GROUP_CHARS).rev() {
            let index = ((acc >> (i * 5)) & 0x1F) as usize;
            out.push(ALPHABET[index] as char);
        }
    }
    out
}

/// Decode a block of symbols. Returns `None` on any symbol outside the
/// alphabet or a length that is not a multiple of 8.
pub fn decode(text: &str) -> Option<Vec<u8>> {
    let symbols = text.as_bytes();
    if symbols.len() % GROUP_CHARS != 0 {
        return None;
    }

    let mut out = Vec::with_capacity(symbols.len() / GROUP_CHARS * GROUP_BYTES);
    for group in symbols.chunks(GROUP_CHARS) {
        let mut acc: u64 = 0;
        for s in group {
            acc = (acc << 5) | u64::from(symbol_value(*s)?);
        }
        for i in (0..GROUP_BYTES).rev() {
            out.push((acc >> (i * 8)) as u8);
        }
    }
    Some(out)
}

fn symbol_value(symbol: u8) -> Option<u8> {
    ALPHABET
        .iter()
        .position(|s| *s == symbol)
        .map(|p| p as u8)
}
