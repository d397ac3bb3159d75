//! Stega: least-significant-bit text steganography for arbitrary files.
//!
//! A payload is hidden one bit per carrier byte, in the lowest bit only, so
//! the carrier's other seven bits are left alone. The last 32 bytes carry a
//! 32-bit character count; the payload itself sits in the bytes before them.
//! The carrier is treated as a flat byte sequence: no image or audio format
//! is parsed, and nothing survives recompression of the carrier. This is not
//! encryption.
//!
//! The crate provides:
//! - The codec itself (`codec`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use stega::codec::{self, decoder, encoder};
//!
//! let mut carrier = vec![0u8; codec::required_len(5)];
//! encoder::encode_in_place(&mut carrier, "hello").unwrap();
//! assert_eq!(decoder::decode(&carrier).unwrap().as_deref(), Some("hello"));
//! ```

pub mod codec;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

pub use codec::{DecodeError, EncodeError, decode, encode, encode_in_place};
