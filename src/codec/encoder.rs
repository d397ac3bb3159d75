// LSB payload encoder.
//
// Writes the character count into the header slots, then each payload
// character (low 8 bits, LSB-first) into the slots preceding the header.
// All validation happens before the first byte is touched, so a rejected
// call leaves the carrier exactly as it was.

use log::{debug, trace, warn};

use super::layout::{self, BITS_PER_CHAR, HEADER_BITS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons an encode call is rejected. The carrier is unmodified in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The carrier cannot even hold the 32-byte length header.
    #[error("carrier too short: {len} bytes, need at least 32 for the header")]
    CarrierTooShort { len: usize },
    /// The payload does not fit in the carrier.
    #[error(
        "payload too long: {chars} characters, carrier of {len} bytes holds at most {capacity}"
    )]
    CapacityExceeded {
        chars: usize,
        capacity: usize,
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Embed `payload` into `carrier` in place.
///
/// Each UTF-16 code unit of `payload` counts as one character; only its low
/// 8 bits are stored. Units above `0xFF` are truncated and will not decode
/// back to the same character.
pub fn encode_in_place(carrier: &mut [u8], payload: &str) -> Result<(), EncodeError> {
    let chars = payload.encode_utf16().count();
    check_capacity(carrier.len(), chars)?;

    let mut truncated = 0usize;
    let units = payload.encode_utf16().map(|unit| {
        if unit > 0xFF {
            truncated += 1;
        }
        unit as u8
    });
    embed(carrier, chars, units);

    if truncated > 0 {
        warn!("{truncated} of {chars} characters exceed 0xFF and were truncated to 8 bits");
    }
    Ok(())
}

/// Embed `payload` into a copy of `carrier` and return the copy.
pub fn encode(payload: &str, carrier: &[u8]) -> Result<Vec<u8>, EncodeError> {
    // Reject before cloning.
    check_capacity(carrier.len(), payload.encode_utf16().count())?;
    let mut out = carrier.to_vec();
    encode_in_place(&mut out, payload)?;
    Ok(out)
}

/// Embed a raw byte payload into `carrier` in place. Every byte value
/// round-trips.
pub fn encode_bytes_in_place(carrier: &mut [u8], payload: &[u8]) -> Result<(), EncodeError> {
    check_capacity(carrier.len(), payload.len())?;
    embed(carrier, payload.len(), payload.iter().copied());
    Ok(())
}

/// Verify that `chars` characters fit in a carrier of `len` bytes.
pub fn check_capacity(len: usize, chars: usize) -> Result<(), EncodeError> {
    if len < HEADER_BITS {
        return Err(EncodeError::CarrierTooShort { len });
    }
    let capacity = layout::capacity(len);
    if chars > capacity {
        return Err(EncodeError::CapacityExceeded {
            chars,
            capacity,
            len,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Bit placement
// ---------------------------------------------------------------------------

/// Write the header and body. `chars` must equal the number of items `units`
/// yields and must already have passed `check_capacity`.
fn embed<I: Iterator<Item = u8>>(carrier: &mut [u8], chars: usize, units: I) {
    let len = carrier.len();
    write_header(carrier, chars as u32);

    let mut written = 0usize;
    for (i, code) in units.enumerate() {
        for j in 0..BITS_PER_CHAR {
            let off = layout::payload_offset(len, i, j);
            carrier[off] = layout::set_lsb(carrier[off], code >> j);
        }
        written += 1;
    }
    debug_assert_eq!(written, chars);

    debug!(
        "encoded {chars} characters into carrier of {len} bytes ({} bytes touched)",
        layout::required_len(chars)
    );
}

fn write_header(carrier: &mut [u8], count: u32) {
    let len = carrier.len();
    trace!("writing length header {count} ({count:#010x})");
    for k in 0..HEADER_BITS {
        let off = layout::header_offset(len, k);
        carrier[off] = layout::set_lsb(carrier[off], (count >> k) as u8);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
