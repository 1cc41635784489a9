//! # Label Security
//!
//! Tokens from other stations, edited tokens and relabelled tokens must
//! never resolve to an identifier. They fall through to the raw-barcode path.

#[cfg(test)]
mod tests {
    use crate::benchmarks::{codec, station};
    use rand::Rng;
    use rt_01_token_codec::{CodecError, TokenContext};
    use rt_02_entity_store::{EntityKind, EventField, Identifier};
    use rt_03_scan_dispatch::{Outcome, ScanContext, ScannedCode};

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_subject_mismatch_fails_closed() {
        let minting = codec("ECK1.COM", "M3A");
        let token = minting
            .encode(
                &id("i000000000000000042").to_payload(),
                &TokenContext::new("ECK1.COM", "M3A"),
            )
            .unwrap();
        let block = &token["ECK1.COM/".len().."ECK1.COM/".len() + 64];

        let result = minting.open(block, &TokenContext::new("ECK1.COM", "M3B"));
        assert_eq!(result, Err(CodecError::AuthenticationFailure));
    }

    #[test]
    fn test_other_station_labels_are_raw_barcodes() {
        let ours = station();
        let theirs = codec("ECK1.COM", "M3B");
        let foreign = theirs
            .encode(
                &id("b000000000000000007").to_payload(),
                &TokenContext::new("ECK1.COM", "M3B"),
            )
            .unwrap();

        // Same shape, wrong subject suffix for this station's accepted length.
        let relabelled = format!("{}M3A", &foreign[..foreign.len() - 3]);
        assert!(matches!(ours.resolve(&relabelled), ScannedCode::Raw(_)));

        let mut ctx = ScanContext::default();
        ours.submit(&mut ctx, "i000000000000000001").unwrap();
        let outcome = ours.submit(&mut ctx, &relabelled).unwrap();
        assert!(matches!(outcome, Outcome::BarcodeRecorded { .. }));
        assert!(!ctx.store.contains(&id("b000000000000000007")));
        assert_eq!(
            ctx.store
                .get(&id("i000000000000000001"))
                .unwrap()
                .log(EventField::Brc)
                .len(),
            1
        );
    }

    #[test]
    fn test_random_symbol_edits_never_resolve() {
        let station = station();
        let token = station.mint_label(&id("p000000000000000003")).unwrap();
        let alphabet = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
        let start = "ECK1.COM/".len();
        let mut rng = rand::thread_rng();

        for _ in 0..200 {
            let mut bytes = token.clone().into_bytes();
            let at = rng.gen_range(start..start + 64);
            let replacement = loop {
                let c = alphabet[rng.gen_range(0..alphabet.len())];
                if c != bytes[at] {
                    break c;
                }
            };
            bytes[at] = replacement;
            let edited = String::from_utf8(bytes).unwrap();

            assert!(
                matches!(station.resolve(&edited), ScannedCode::Raw(_)),
                "edit at {at} resolved"
            );
        }
    }

    #[test]
    fn test_garbage_never_creates_entities() {
        let station = station();
        let mut ctx = ScanContext::default();
        let mut rng = rand::thread_rng();

        for _ in 0..200 {
            let len = rng.gen_range(0..100);
            let raw: String = (0..len)
                .map(|_| rng.gen_range(b'!'..=b'~') as char)
                .collect();
            if raw.trim().chars().next().map_or(false, |c| "iIbBpPoOuU".contains(c)) {
                continue;
            }
            let _ = station.submit(&mut ctx, &raw);
        }

        // Seven-digit strings expand to items; nothing else may appear.
        assert!(ctx
            .store
            .entities_of(EntityKind::Box)
            .next()
            .is_none());
    }
}
