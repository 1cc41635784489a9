//! # Token Codec
//!
//! ```text
//! token = domain ‖ "/" ‖ block(64) ‖ subject
//! block = alphabet(nonce(9) ‖ AES-192-GCM(payload)(19) ‖ tag[..12])
//! iv    = SHA-256(subject ‖ domain)[..3] ‖ nonce
//! ```
//!
//! ## Security Properties
//!
//! - Fail closed: every decode failure is `AuthenticationFailure`, no
//!   partial payload is ever returned.
//! - Domain and subject are authenticated through the IV. Decode derives
//!   the IV from the values found in the token itself, so a block moved
//!   under another subject suffix fails tag verification.
//! - 96-bit tags (see `domain::packet`).

use crate::config::{validate_domain, validate_subject, CodecConfig};
use crate::domain::context::TokenContext;
use crate::domain::packet::{Payload, WirePacket, BLOCK_LEN, NONCE_LEN, TAG_LEN};
use crate::CodecError;
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes192;
use aes_gcm::{AesGcm, Nonce, Tag};
use tracing::debug;

/// AES-192-GCM with a 96-bit nonce and a tag truncated to 96 bits.
type Aes192Gcm96 = AesGcm<Aes192, U12, U12>;

/// Token separator between domain and block.
const SEPARATOR: char = '/';

/// Encodes payloads into label tokens and back.
pub struct TokenCodec {
    cipher: Aes192Gcm96,
    config: CodecConfig,
}

impl TokenCodec {
    /// Create a codec from a validated configuration.
    pub fn new(config: CodecConfig) -> Result<Self, CodecError> {
        config.validate()?;
        let cipher = Aes192Gcm96::new_from_slice(config.key.as_bytes()).map_err(|_| {
            CodecError::InvalidKeyLength {
                expected: crate::config::KEY_LEN,
                actual: config.key.as_bytes().len(),
            }
        })?;
        Ok(Self { cipher, config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Context used by [`TokenCodec::mint`].
    pub fn default_context(&self) -> TokenContext {
        let domain = self.config.primary_domain().unwrap_or_default();
        TokenContext::new(domain, self.config.subject.clone())
    }

    /// Total token length for `domain`.
    pub fn token_len(&self, domain: &str) -> usize {
        domain.len() + 1 + BLOCK_LEN + self.config.subject_len
    }

    /// Whether `raw` has the outer shape of a token from an accepted domain.
    ///
    /// Cheap pre-check for scan routing; says nothing about authenticity.
    pub fn is_token_shaped(&self, raw: &str) -> bool {
        self.split(raw).is_some()
    }

    /// Encode a payload under the configured minting context.
    pub fn mint(&self, payload: &Payload) -> Result<String, CodecError> {
        self.encode(payload, &self.default_context())
    }

    /// Encode a payload for `ctx`.
    pub fn encode(&self, payload: &Payload, ctx: &TokenContext) -> Result<String, CodecError> {
        validate_domain(&ctx.domain)?;
        validate_subject(&ctx.subject, self.config.subject_len)?;

        let mut nonce = [0u8; NONCE_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut nonce);

        let packet = self.seal(payload, nonce, ctx)?;

        let mut token = String::with_capacity(self.token_len(&ctx.domain));
        token.push_str(&ctx.domain);
        token.push(SEPARATOR);
        token.push_str(&packet.to_block());
        token.push_str(&ctx.subject);
        Ok(token)
    }

    /// Decode a full token.
    pub fn decode(&self, token: &str) -> Result<Payload, CodecError> {
        let (ctx, block) = self.split(token).ok_or_else(|| {
            debug!("[rt-01] token rejected: malformed outer structure");
            CodecError::AuthenticationFailure
        })?;
        self.open(block, &ctx)
    }

    /// Decode a bare 64-symbol block under an explicit context.
    pub fn open(&self, block: &str, ctx: &TokenContext) -> Result<Payload, CodecError> {
        let packet = WirePacket::from_block(block).ok_or_else(|| {
            debug!("[rt-01] token rejected: malformed block");
            CodecError::AuthenticationFailure
        })?;

        let iv = packet.iv(&ctx.context_part());
        let mut buffer: Payload = packet.ciphertext;
        self.cipher
            .decrypt_in_place_detached(
                Nonce::<U12>::from_slice(&iv),
                b"",
                &mut buffer,
                Tag::<U12>::from_slice(&packet.tag),
            )
            .map_err(|_| {
                debug!(domain = %ctx.domain, "[rt-01] token rejected: tag mismatch");
                CodecError::AuthenticationFailure
            })?;

        Ok(buffer)
    }

    fn seal(
        &self,
        payload: &Payload,
        nonce: [u8; NONCE_LEN],
        ctx: &TokenContext,
    ) -> Result<WirePacket, CodecError> {
        let mut packet = WirePacket {
            nonce,
            ciphertext: *payload,
            tag: [0u8; TAG_LEN],
        };
        let iv = packet.iv(&ctx.context_part());

        let tag = self
            .cipher
            .encrypt_in_place_detached(Nonce::<U12>::from_slice(&iv), b"", &mut packet.ciphertext)
            .map_err(|_| CodecError::EncryptionFailed)?;
        packet.tag.copy_from_slice(&tag);

        Ok(packet)
    }

    /// Split a token into its received context and block.
    fn split<'a>(&self, token: &'a str) -> Option<(TokenContext, &'a str)> {
        let (domain, rest) = token.split_once(SEPARATOR)?;
        if !self.config.domains.iter().any(|d| d == domain) {
            return None;
        }
        if rest.len() != BLOCK_LEN + self.config.subject_len {
            return None;
        }
        let block = rest.get(..BLOCK_LEN)?;
        let subject = rest.get(BLOCK_LEN..)?;
        if validate_subject(subject, self.config.subject_len).is_err() {
            return None;
        }
        Some((TokenContext::new(domain, subject), block))
    }
}
