use proptest::prelude::*;
use stega::codec::{decoder, encoder, layout};

fn latin1_string(max: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<u8>(), 0..max)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(
        text in latin1_string(256),
        extra in 0usize..64,
        fill in any::<u8>(),
    ) {
        let chars = text.chars().count();
        let carrier = vec![fill; layout::required_len(chars) + extra];
        let out = encoder::encode(&text, &carrier).unwrap();
        let decoded = decoder::decode(&out).unwrap();
        if chars == 0 {
            prop_assert_eq!(decoded, None);
        } else {
            prop_assert_eq!(decoded, Some(text));
        }
    }

    #[test]
    fn prop_only_lsbs_change(
        carrier in proptest::collection::vec(any::<u8>(), 32..2048),
        payload in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut buf = carrier.clone();
        if encoder::encode_bytes_in_place(&mut buf, &payload).is_ok() {
            let untouched = carrier.len() - layout::required_len(payload.len());
            for (i, (a, b)) in carrier.iter().zip(&buf).enumerate() {
                prop_assert_eq!((a ^ b) & 0xFE, 0);
                if i < untouched {
                    prop_assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn prop_rejection_does_not_mutate(
        carrier in proptest::collection::vec(any::<u8>(), 0..512),
        text in latin1_string(128),
    ) {
        let mut buf = carrier.clone();
        let fits = carrier.len() >= layout::HEADER_BITS
            && text.chars().count() <= layout::capacity(carrier.len());
        let result = encoder::encode_in_place(&mut buf, &text);
        prop_assert_eq!(result.is_ok(), fits);
        if !fits {
            prop_assert_eq!(buf, carrier);
        }
    }

    #[test]
    fn prop_decode_never_panics(carrier in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let info = decoder::inspect(&carrier);
        match decoder::decode(&carrier) {
            Ok(Some(text)) => {
                prop_assert!(info.payload_fits());
                prop_assert_eq!(Some(text.chars().count()), info.declared);
            }
            Ok(None) => prop_assert!(info.declared.is_none()),
            Err(_) => prop_assert!(!info.payload_fits()),
        }
    }
}
