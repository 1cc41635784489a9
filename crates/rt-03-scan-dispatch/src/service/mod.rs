//! # Scan Dispatcher Service
//!
//! Turns raw scans into store mutations.
//!
//! ## Drain Table
//!
//! | Scanned | Drains | Child log | Container log |
//! |---------|--------|-----------|---------------|
//! | Box | items | `loc` | `cont` |
//! | Place | items, then boxes | `loc` | `cont` |
//! | Order | boxes | `in` | `cont` |
//!
//! Every buffered entry is committed whatever its active flag. After the
//! drain the container itself is toggled in its own buffer (boxes and
//! places only). All edges of one scan share one timestamp.

mod drain;

use crate::domain::attribute::Attribute;
use crate::domain::buffer::PendingBuffer;
use crate::domain::errors::{ConfigError, ScanError};
use crate::domain::outcome::Outcome;
use crate::domain::scan::{parse_plain, parse_short_code, ScanSource, ScannedCode};
use crate::domain::session::ScanSession;
use crate::domain::value_objects::DispatchConfig;
use rt_01_token_codec::{CodecError, TokenCodec, PAYLOAD_LEN};
use rt_02_entity_store::{
    ClassRegistry, EntityKind, EntityStore, EventField, Identifier, TimeSource, Timestamp,
    IDENTIFIER_LEN,
};

// The label payload is the canonical identifier text.
const _: () = assert!(PAYLOAD_LEN == IDENTIFIER_LEN);

/// Mutable state one submit pipeline works on.
///
/// Hosts with several scanners share one context behind a single lock;
/// independent contexts never interact.
#[derive(Debug, Default)]
pub struct ScanContext {
    pub store: EntityStore,
    pub session: ScanSession,
}

impl ScanContext {
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            session: ScanSession::new(),
        }
    }

    /// Buffered identifiers of `kind`, in buffer order.
    pub fn pending(&self, kind: EntityKind) -> Vec<Identifier> {
        self.session
            .pending(kind)
            .map(|buffer| buffer.ids())
            .unwrap_or_default()
    }

    /// Reset the session without committing anything.
    pub fn clear_pending(&mut self) {
        self.session.clear();
    }
}

/// The Scan Dispatcher.
pub struct ScanDispatcher<R: ClassRegistry, T: TimeSource> {
    codec: TokenCodec,
    registry: R,
    clock: T,
    config: DispatchConfig,
}

impl<R: ClassRegistry, T: TimeSource> ScanDispatcher<R, T> {
    pub fn new(
        codec: TokenCodec,
        registry: R,
        clock: T,
        config: DispatchConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            codec,
            registry,
            clock,
            config,
        })
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Resolve a raw scan without touching any state.
    pub fn resolve(&self, raw: &str) -> ScannedCode {
        let raw = raw.trim();

        if self.codec.is_token_shaped(raw) {
            match self.decode_token(raw) {
                Some(id) => {
                    return ScannedCode::Entity {
                        id,
                        source: ScanSource::Token,
                    }
                }
                None => {
                    #[cfg(feature = "tracing-log")]
                    tracing::warn!("[rt-03] token-shaped scan failed to decode");
                }
            }
        }

        if let Some(id) = parse_short_code(raw, &self.config) {
            return ScannedCode::Entity {
                id,
                source: ScanSource::ShortCode,
            };
        }

        if self.config.accept_plain {
            if let Some(id) = parse_plain(raw) {
                return ScannedCode::Entity {
                    id,
                    source: ScanSource::Plain,
                };
            }
        }

        ScannedCode::Raw(raw.to_string())
    }

    /// Process one scan to completion.
    ///
    /// A blank scan is reported as unclassified and touches nothing.
    pub fn submit(&self, ctx: &mut ScanContext, raw: &str) -> Result<Outcome, ScanError> {
        if raw.trim().is_empty() {
            return Ok(Outcome::Unclassified {
                code: String::new(),
            });
        }
        let now = self.clock.now();

        match self.resolve(raw) {
            ScannedCode::Entity { id, source } => match id.kind() {
                EntityKind::Item => {
                    let created = ctx.store.upsert(id, now);
                    let op = ctx.session.buffer_item(id);

                    #[cfg(feature = "tracing-log")]
                    tracing::debug!(id = %id, ?op, "[rt-03] item buffered");

                    Ok(Outcome::Buffered {
                        id,
                        source,
                        created,
                        op,
                    })
                }
                EntityKind::Box | EntityKind::Place | EntityKind::Order => {
                    let created = ctx.store.upsert(id, now);
                    let committed = drain::commit(ctx, &id, now)?;
                    let op = ctx.session.toggle(id);

                    #[cfg(feature = "tracing-log")]
                    tracing::info!(
                        container = %id,
                        committed = committed.len(),
                        "[rt-03] drained into {}",
                        id.kind()
                    );

                    Ok(Outcome::Drained {
                        container: id,
                        source,
                        created,
                        committed,
                        op,
                    })
                }
                EntityKind::User => {
                    let created = ctx.store.upsert(id, now);
                    Ok(Outcome::UserSeen { id, created })
                }
            },
            ScannedCode::Raw(code) => self.record_barcode(ctx, code, now),
        }
    }

    /// Apply free-text operator input to the current target.
    ///
    /// Blank input is ignored and returns `Ok(None)`.
    pub fn annotate(
        &self,
        ctx: &mut ScanContext,
        input: &str,
    ) -> Result<Option<(Identifier, Attribute)>, ScanError> {
        let Some(attribute) = Attribute::parse(input) else {
            return Ok(None);
        };
        let target = ctx
            .session
            .current_target()
            .ok_or(ScanError::NoActiveTarget)?;

        ctx.store.append_event(
            &target,
            attribute.field,
            attribute.values.clone(),
            self.clock.now(),
        )?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!(entity = %target, field = %attribute.field, "[rt-03] attribute recorded");

        Ok(Some((target, attribute)))
    }

    /// Mint a label token for `id` under the configured minting context.
    pub fn mint_label(&self, id: &Identifier) -> Result<String, CodecError> {
        self.codec.mint(&id.to_payload())
    }

    fn decode_token(&self, raw: &str) -> Option<Identifier> {
        let payload = self.codec.decode(raw).ok()?;
        Identifier::from_payload(&payload).ok()
    }

    fn record_barcode(
        &self,
        ctx: &mut ScanContext,
        code: String,
        now: Timestamp,
    ) -> Result<Outcome, ScanError> {
        let last = |kind| {
            ctx.session
                .pending(kind)
                .and_then(PendingBuffer::last)
                .map(|entry| entry.id)
        };
        let last_item = last(EntityKind::Item);
        let last_box = last(EntityKind::Box);

        if let Some(item) = last_item {
            if let Some(class) = self.registry.lookup(&code) {
                let changed = ctx.store.rebind_class(&item, class.clone(), now)?;
                return Ok(Outcome::ClassBound {
                    item,
                    class,
                    changed,
                });
            }
            ctx.store
                .append_event(&item, EventField::Brc, vec![code.clone()], now)?;
            return Ok(Outcome::BarcodeRecorded { target: item, code });
        }

        if let Some(bx) = last_box {
            ctx.store
                .append_event(&bx, EventField::Brc, vec![code.clone()], now)?;
            return Ok(Outcome::BarcodeRecorded { target: bx, code });
        }

        #[cfg(feature = "tracing-log")]
        tracing::info!(code = %code, "[rt-03] unclassified barcode");

        Ok(Outcome::Unclassified { code })
    }
}
