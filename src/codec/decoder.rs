// LSB payload decoder.
//
// Reads the 32-bit length header from the last 32 bytes, then rebuilds each
// character from the 8 slots preceding it. The header is bounds-checked
// against the carrier before any body slot is read.

use log::{debug, trace};

use super::layout::{self, BITS_PER_CHAR, HEADER_BITS};

// ---------------------------------------------------------------------------
// Decoder error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The carrier cannot hold a length header at all.
    #[error("carrier too short: {len} bytes, need at least 32 for the header")]
    CarrierTooShort { len: usize },
    /// The header declares more characters than the carrier can hold. Either
    /// the carrier was truncated or it was never encoded.
    #[error(
        "header declares {declared} characters but carrier of {len} bytes holds at most {capacity}"
    )]
    OutOfBounds {
        declared: usize,
        capacity: usize,
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Read the raw 32-bit length header.
pub fn read_header(carrier: &[u8]) -> Result<u32, DecodeError> {
    let len = carrier.len();
    if len < HEADER_BITS {
        return Err(DecodeError::CarrierTooShort { len });
    }
    let mut header = 0u32;
    for k in 0..HEADER_BITS {
        let off = layout::header_offset(len, k);
        header |= u32::from(layout::lsb(carrier[off])) << k;
    }
    trace!("read length header {header} ({header:#010x})");
    Ok(header)
}

/// Interpret a raw header as a payload length.
///
/// The header is a signed 32-bit count: zero and negative values mean the
/// carrier holds no payload.
#[inline]
pub fn declared_len(header: u32) -> Option<usize> {
    let signed = header as i32;
    if signed > 0 {
        Some(signed as usize)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Recover the hidden payload as raw bytes, one byte per character.
///
/// Returns `Ok(None)` when the header is zero or negative.
pub fn decode_bytes(carrier: &[u8]) -> Result<Option<Vec<u8>>, DecodeError> {
    let header = read_header(carrier)?;
    let Some(declared) = declared_len(header) else {
        debug!("header {header:#010x} is non-positive, no payload");
        return Ok(None);
    };

    let len = carrier.len();
    let capacity = layout::capacity(len);
    if declared > capacity {
        return Err(DecodeError::OutOfBounds {
            declared,
            capacity,
            len,
        });
    }

    let mut out = Vec::with_capacity(declared);
    for i in 0..declared {
        let mut code = 0u8;
        for j in 0..BITS_PER_CHAR {
            let off = layout::payload_offset(len, i, j);
            code |= layout::lsb(carrier[off]) << j;
        }
        out.push(code);
    }

    debug!("decoded {declared} characters from carrier of {len} bytes");
    Ok(Some(out))
}

/// Recover the hidden text.
///
/// Each decoded byte becomes the character with that code point (0..=255),
/// which is exactly what the encoder keeps of each UTF-16 code unit.
pub fn decode(carrier: &[u8]) -> Result<Option<String>, DecodeError> {
    Ok(decode_bytes(carrier)?.map(|bytes| bytes.into_iter().map(char::from).collect()))
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Summary of what a carrier's header says, without failing on bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierInfo {
    /// Carrier size in bytes.
    pub len: usize,
    /// Maximum payload characters the carrier can hold.
    pub capacity: usize,
    /// Raw header value, if the carrier is long enough to have one.
    pub header: Option<u32>,
    /// Payload length the header declares, if positive.
    pub declared: Option<usize>,
}

impl CarrierInfo {
    /// Whether `decode` would succeed and return a payload.
    pub fn payload_fits(&self) -> bool {
        self.declared.is_some_and(|d| d <= self.capacity)
    }
}

/// Describe `carrier`'s header and capacity.
pub fn inspect(carrier: &[u8]) -> CarrierInfo {
    let header = read_header(carrier).ok();
    CarrierInfo {
        len: carrier.len(),
        capacity: layout::capacity(carrier.len()),
        header,
        declared: header.and_then(declared_len),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encoder;

    /// Set the header slots of `carrier` to `value` without touching the body.
    fn stamp_header(carrier: &mut [u8], value: u32) {
        let len = carrier.len();
        for k in 0..HEADER_BITS {
            let off = layout::header_offset(len, k);
            carrier[off] = layout::set_lsb(carrier[off], (value >> k) as u8);
        }
    }

    #[test]
    fn decodes_reference_scenario() {
        let mut carrier = vec![0u8; 40];
        encoder::encode_in_place(&mut carrier, "A").unwrap();
        assert_eq!(read_header(&carrier).unwrap(), 1);
        assert_eq!(decode(&carrier).unwrap().as_deref(), Some("A"));
    }

    #[test]
    fn zero_header_is_none() {
        let carrier = vec![0u8; 64];
        assert_eq!(decode(&carrier).unwrap(), None);
        assert_eq!(decode_bytes(&carrier).unwrap(), None);
    }

    #[test]
    fn negative_header_is_none() {
        let mut carrier = vec![0u8; 64];
        stamp_header(&mut carrier, 0x8000_0001);
        assert_eq!(decode(&carrier).unwrap(), None);
        stamp_header(&mut carrier, u32::MAX);
        assert_eq!(decode(&carrier).unwrap(), None);
    }

    #[test]
    fn short_carrier_is_rejected() {
        assert_eq!(
            decode(&[0u8; 31]),
            Err(DecodeError::CarrierTooShort { len: 31 })
        );
        assert_eq!(
            read_header(&[]),
            Err(DecodeError::CarrierTooShort { len: 0 })
        );
    }

    #[test]
    fn oversized_header_is_out_of_bounds() {
        let mut carrier = vec![0u8; 40];
        stamp_header(&mut carrier, 2);
        assert_eq!(
            decode(&carrier),
            Err(DecodeError::OutOfBounds {
                declared: 2,
                capacity: 1,
                len: 40
            })
        );
    }

    #[test]
    fn all_ones_carrier_is_none() {
        // Every LSB set gives header 0xFFFF_FFFF = -1.
        let carrier = vec![0xFFu8; 128];
        assert_eq!(read_header(&carrier).unwrap(), u32::MAX);
        assert_eq!(decode(&carrier).unwrap(), None);
    }

    #[test]
    fn unwritten_body_still_yields_declared_length() {
        let mut carrier: Vec<u8> = (0..=255u8).cycle().take(32 + 8 * 5).collect();
        stamp_header(&mut carrier, 5);
        let text = decode(&carrier).unwrap().unwrap();
        assert_eq!(text.chars().count(), 5);
    }

    #[test]
    fn latin1_range_roundtrips() {
        let text: String = (0u8..=255).map(char::from).collect();
        let mut carrier = vec![0x33u8; layout::required_len(256)];
        encoder::encode_in_place(&mut carrier, &text).unwrap();
        assert_eq!(decode(&carrier).unwrap().as_deref(), Some(text.as_str()));
    }

    #[test]
    fn inspect_reports_header_state() {
        let mut carrier = vec![0u8; 48];
        encoder::encode_in_place(&mut carrier, "ok").unwrap();
        let info = inspect(&carrier);
        assert_eq!(info.len, 48);
        assert_eq!(info.capacity, 2);
        assert_eq!(info.header, Some(2));
        assert_eq!(info.declared, Some(2));
        assert!(info.payload_fits());

        let short = inspect(&[0u8; 8]);
        assert_eq!(short.header, None);
        assert_eq!(short.declared, None);
        assert!(!short.payload_fits());

        let mut bogus = vec![0u8; 40];
        stamp_header(&mut bogus, 9);
        let info = inspect(&bogus);
        assert_eq!(info.declared, Some(9));
        assert!(!info.payload_fits());
    }
}
