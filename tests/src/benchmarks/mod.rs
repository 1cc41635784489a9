//! # Fixtures
//!
//! Dispatcher and identifier builders shared by the integration tests and
//! the criterion benches.

use rt_01_token_codec::{CodecConfig, CodecKey, TokenCodec};
use rt_02_entity_store::{ClassId, EntityKind, Identifier, InMemoryClassRegistry, ManualClock};
use rt_03_scan_dispatch::{DispatchConfig, ScanDispatcher};

/// Dispatcher used throughout the suite.
pub type Station = ScanDispatcher<InMemoryClassRegistry, ManualClock>;

/// Fixed test key.
pub const TEST_KEY: [u8; 24] = [0x42; 24];

/// Class code registered in every station.
pub const PHONE_EAN: &str = "4006381333931";

/// Codec for `domain`/`subject` under the test key.
pub fn codec(domain: &str, subject: &str) -> TokenCodec {
    let config = CodecConfig::default()
        .with_key(CodecKey::from_bytes(TEST_KEY))
        .with_domains([domain])
        .with_subject(subject);
    match TokenCodec::new(config) {
        Ok(codec) => codec,
        Err(e) => panic!("fixture codec rejected: {e}"),
    }
}

/// Station minting for `ECK1.COM`/`M3A`, clock at 1_000 ms.
pub fn station() -> Station {
    let mut registry = InMemoryClassRegistry::new();
    registry.register(ClassId::new("phone"), "Phone", [PHONE_EAN]);

    match ScanDispatcher::new(
        codec("ECK1.COM", "M3A"),
        registry,
        ManualClock::new(1_000),
        DispatchConfig::default(),
    ) {
        Ok(station) => station,
        Err(e) => panic!("fixture dispatcher rejected: {e}"),
    }
}

/// `count` identifiers of `kind`, serials starting at `first`.
pub fn ids(kind: EntityKind, first: u64, count: usize) -> Vec<Identifier> {
    (first..first + count as u64)
        .filter_map(|serial| Identifier::new(kind, serial).ok())
        .collect()
}
