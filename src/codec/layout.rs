// Carrier layout: where each header and payload bit lives.
//
// The carrier is addressed backward from its last byte. The 32-bit length
// header occupies the LSBs of the final 32 bytes (header bit 0 in the very
// last byte), and payload character `i`, bit `j` sits immediately before it:
//
//   offset = len - 1 - i * 8 - j - 32
//
// Encoder and decoder both go through these functions; neither computes an
// offset on its own.

/// Number of carrier bytes holding the length header (one bit per byte).
pub const HEADER_BITS: usize = 32;

/// Number of carrier bytes holding one payload character.
pub const BITS_PER_CHAR: usize = 8;

/// Largest payload length the header can describe. The header is read back as
/// a signed 32-bit value, so anything above `i32::MAX` would decode as "empty".
pub const MAX_PAYLOAD_CHARS: usize = i32::MAX as usize;

/// Byte offset of header bit `k` (0 = least significant) in a carrier of
/// `len` bytes.
///
/// Callers must ensure `len >= HEADER_BITS` and `k < HEADER_BITS`.
#[inline]
pub const fn header_offset(len: usize, k: usize) -> usize {
    debug_assert!(k < HEADER_BITS);
    len - 1 - k
}

/// Byte offset of bit `j` (0 = least significant) of payload character `i`
/// in a carrier of `len` bytes.
///
/// Callers must ensure `len >= required_len(i + 1)` and `j < BITS_PER_CHAR`.
#[inline]
pub const fn payload_offset(len: usize, i: usize, j: usize) -> usize {
    debug_assert!(j < BITS_PER_CHAR);
    len - 1 - i * BITS_PER_CHAR - j - HEADER_BITS
}

/// Maximum number of payload characters a carrier of `len` bytes can hold.
///
/// Carriers shorter than the header hold nothing.
#[inline]
pub const fn capacity(len: usize) -> usize {
    let chars = len.saturating_sub(HEADER_BITS) / BITS_PER_CHAR;
    if chars > MAX_PAYLOAD_CHARS {
        MAX_PAYLOAD_CHARS
    } else {
        chars
    }
}

/// Minimum carrier length needed for a payload of `chars` characters.
///
/// Saturates instead of overflowing for absurd lengths.
#[inline]
pub const fn required_len(chars: usize) -> usize {
    HEADER_BITS.saturating_add(chars.saturating_mul(BITS_PER_CHAR))
}

/// Replace the LSB of `byte` with the low bit of `bit`, keeping bits 1..=7.
#[inline]
pub const fn set_lsb(byte: u8, bit: u8) -> u8 {
    (byte & 0xFE) | (bit & 1)
}

/// The LSB of `byte`.
#[inline]
pub const fn lsb(byte: u8) -> u8 {
    byte & 1
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
