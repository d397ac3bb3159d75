#![no_main]
use libfuzzer_sys::fuzz_target;
use stega::codec::decoder;

fuzz_target!(|data: &[u8]| {
    // Arbitrary carriers must never panic, only return errors or `None`.
    let _ = decoder::decode(data);
    let info = decoder::inspect(data);

    // A declared length that fits must decode to exactly that many characters.
    if info.payload_fits() {
        let text = decoder::decode(data).unwrap().unwrap();
        assert_eq!(Some(text.chars().count()), info.declared);
    }
});
