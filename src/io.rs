// File-level I/O helpers for hiding and revealing text.
//
// Provides `hide_file()`, `hide_to()` and `reveal_file()`, which read a
// carrier fully into memory, run the codec over it, and persist the result.
// Optionally computes SHA-256 checksums of the carrier (feature-gated behind
// `file-io`).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::codec::decoder::{self, DecodeError};
use crate::codec::encoder::{self, EncodeError};
use crate::codec::layout;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `hide_file()` and `hide_to()`.
#[derive(Debug, Clone)]
pub struct HideStats {
    /// Carrier size in bytes.
    pub carrier_size: u64,
    /// Number of characters embedded.
    pub payload_chars: u64,
    /// Maximum characters the carrier could hold.
    pub capacity: u64,
    /// SHA-256 of the source carrier (if `file-io` feature is enabled).
    pub source_sha256: Option<[u8; 32]>,
    /// SHA-256 of the written carrier (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

/// Statistics returned by `reveal_file()`.
#[derive(Debug, Clone)]
pub struct RevealStats {
    /// Carrier size in bytes.
    pub carrier_size: u64,
    /// Number of characters recovered (0 when nothing was hidden).
    pub payload_chars: u64,
    /// Maximum characters the carrier could hold.
    pub capacity: u64,
    /// SHA-256 of the carrier (if `file-io` feature is enabled).
    pub carrier_sha256: Option<[u8; 32]>,
}

/// Result of `reveal_file()`.
#[derive(Debug, Clone)]
pub struct Revealed {
    /// The hidden text, or `None` if the header declares no payload.
    pub text: Option<String>,
    pub stats: RevealStats,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The payload could not be embedded.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    /// The carrier could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// hide
// ---------------------------------------------------------------------------

/// Hide `text` in the carrier at `source_path`, writing the result to
/// `destination_path`.
///
/// The destination is only created once encoding has succeeded; a rejected
/// payload leaves it untouched.
pub fn hide_file(
    text: &str,
    source_path: &Path,
    destination_path: &Path,
) -> Result<HideStats, IoError> {
    let mut carrier = std::fs::read(source_path)?;
    let mut stats = embed(text, &mut carrier)?;

    let file = File::create(destination_path)?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
    writer.write_all(&carrier)?;
    writer.flush()?;

    stats.output_sha256 = sha256(&carrier);
    Ok(stats)
}

/// Hide `text` in the carrier at `source_path`, writing the result to `out`.
pub fn hide_to<W: Write>(text: &str, source_path: &Path, out: &mut W) -> Result<HideStats, IoError> {
    let mut carrier = std::fs::read(source_path)?;
    let mut stats = embed(text, &mut carrier)?;

    out.write_all(&carrier)?;
    out.flush()?;

    stats.output_sha256 = sha256(&carrier);
    Ok(stats)
}

fn embed(text: &str, carrier: &mut [u8]) -> Result<HideStats, IoError> {
    let source_sha256 = sha256(carrier);
    encoder::encode_in_place(carrier, text)?;

    Ok(HideStats {
        carrier_size: carrier.len() as u64,
        payload_chars: text.encode_utf16().count() as u64,
        capacity: layout::capacity(carrier.len()) as u64,
        source_sha256,
        output_sha256: None,
    })
}

// ---------------------------------------------------------------------------
// reveal
// ---------------------------------------------------------------------------

/// Recover hidden text from the carrier at `source_path`.
pub fn reveal_file(source_path: &Path) -> Result<Revealed, IoError> {
    let carrier = std::fs::read(source_path)?;
    let text = decoder::decode(&carrier)?;

    let stats = RevealStats {
        carrier_size: carrier.len() as u64,
        payload_chars: text.as_ref().map_or(0, |t| t.chars().count() as u64),
        capacity: layout::capacity(carrier.len()) as u64,
        carrier_sha256: sha256(&carrier),
    };
    Ok(Revealed { text, stats })
}

// ---------------------------------------------------------------------------
// Checksums (file-io feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    let mut h = sha2::Sha256::new();
    h.update(data);
    Some(h.finalize().into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

/// Lowercase hex rendering of a digest.
pub fn hex(digest: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(s, "{b:02x}");
    }
    s
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
