// LSB steganography codec.
//
// Hides a length-prefixed payload in the least-significant bits of a flat
// byte buffer, working backward from the end of the buffer.
//
// # Modules
//
// - `layout`  — Slot addressing shared by both directions, capacity arithmetic
// - `encoder` — Capacity check, header and payload embedding
// - `decoder` — Header read, bounds check, payload extraction, inspection

pub mod decoder;
pub mod encoder;
pub mod layout;

// Re-export key types for convenience.
pub use decoder::{CarrierInfo, DecodeError, decode, decode_bytes, inspect, read_header};
pub use encoder::{EncodeError, encode, encode_bytes_in_place, encode_in_place};
pub use layout::{BITS_PER_CHAR, HEADER_BITS, capacity, required_len};
