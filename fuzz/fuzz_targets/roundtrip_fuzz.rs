#![no_main]
use libfuzzer_sys::fuzz_target;
use stega::codec::{decoder, encoder, layout};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the payload length, the rest is the carrier.
    let carrier = &data[1..];
    let want = data[0] as usize;
    let chars = want.min(layout::capacity(carrier.len()));
    let payload: Vec<u8> = carrier.iter().rev().take(chars).copied().collect();

    let mut buf = carrier.to_vec();
    match encoder::encode_bytes_in_place(&mut buf, &payload) {
        Ok(()) => {
            // Only LSBs may change.
            for (a, b) in buf.iter().zip(carrier) {
                assert_eq!(a & 0xFE, b & 0xFE);
            }
            let out = decoder::decode_bytes(&buf).unwrap();
            if payload.is_empty() {
                assert_eq!(out, None);
            } else {
                assert_eq!(out.as_deref(), Some(payload.as_slice()));
            }
        }
        Err(_) => assert_eq!(buf.as_slice(), carrier),
    }
});
