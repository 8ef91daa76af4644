//! # lzwarc-LZW: Adaptive LZW with usage-driven pruning
//!
//! This crate provides the LZW codec of the lzwarc archiver. Unlike
//! fixed-table LZW (TIFF, GIF), the dictionary never resets: when the code
//! width reaches its ceiling, entries that were referenced at most
//! `prune_threshold` times are dropped and the survivors renumbered, which
//! frees width budget for new strings on arbitrarily long input.
//!
//! ## Stream Format
//!
//! - **Prefix byte**: `100` for an LZW stream, `0` for a raw passthrough
//! - **Codes**: MSB-first, no byte alignment, 9 bits up to `max_bits`
//! - **Alphabet**: codes 1..=256 are the single bytes 0..=255; code 0 is
//!   never transmitted
//! - **Padding**: zero bits up to the next byte boundary
//! - **No length, no end code**: the caller supplies the decompressed size
//!
//! ## Example
//!
//! ```rust
//! use lzwarc_lzw::{compress, decompress, LzwConfig};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! // Compress, falling back to a raw stream if LZW does not help
//! let compressed = compress(original, LzwConfig::DEFAULT).unwrap();
//!
//! // Decompress
//! let decompressed = decompress(&compressed, original.len(), LzwConfig::DEFAULT).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Not Beneficial Is Not an Error
//!
//! [`encode`] always produces the LZW stream and reports through
//! [`EncodeOutcome::beneficial`] whether it is worth keeping:
//!
//! ```rust
//! use lzwarc_lzw::{encode, LzwConfig};
//!
//! let encoded = encode(b"x", LzwConfig::DEFAULT).unwrap();
//! assert!(!encoded.outcome.beneficial);
//! assert_eq!(encoded.data[0], 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
pub mod dictionary;
mod encoder;
mod error;
pub mod prune;

pub use config::LzwConfig;
pub use decoder::{DecodeOutcome, LzwDecoder};
pub use encoder::{EncodeOutcome, Encoded, LzwEncoder};
pub use error::{LzwError, Result};
pub use lzwarc_core::StreamKind;
pub use prune::CodecEvent;

/// Encode data with LZW, keeping the LZW stream even if it is larger.
///
/// # Example
///
/// ```rust
/// use lzwarc_lzw::{encode, LzwConfig};
///
/// let encoded = encode(b"AAAAAAAAAA", LzwConfig::DEFAULT).unwrap();
/// assert!(encoded.outcome.beneficial);
/// assert_eq!(encoded.data.len(), 6);
/// ```
pub fn encode(data: &[u8], config: LzwConfig) -> Result<Encoded> {
    LzwEncoder::new(config)?.encode(data)
}

/// Compress data, returning whichever of the LZW stream and the raw
/// passthrough stream is smaller.
///
/// # Example
///
/// ```rust
/// use lzwarc_lzw::{compress, LzwConfig, StreamKind};
///
/// let data = b"TOBEORNOTTOBEORTOBEORNOT".repeat(4);
/// let compressed = compress(&data, LzwConfig::DEFAULT).unwrap();
/// assert_eq!(compressed[0], StreamKind::LZW_PREFIX);
/// assert!(compressed.len() < data.len());
///
/// let stored = compress(b"abc", LzwConfig::DEFAULT).unwrap();
/// assert_eq!(stored, b"\0abc");
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let encoded = encode(data, config)?;
    if encoded.outcome.beneficial {
        return Ok(encoded.data);
    }
    let mut raw = Vec::with_capacity(data.len() + 1);
    lzwarc_core::write_raw(data, &mut raw)?;
    Ok(raw)
}

/// Decompress a raw or LZW stream of `expected_size` bytes.
///
/// # Example
///
/// ```rust
/// use lzwarc_lzw::{compress, decompress, LzwConfig};
///
/// let original = b"Hello, World!";
/// let compressed = compress(original, LzwConfig::COMPACT).unwrap();
/// let decompressed = decompress(&compressed, original.len(), LzwConfig::COMPACT).unwrap();
/// assert_eq!(decompressed, original);
/// ```
pub fn decompress(data: &[u8], expected_size: usize, config: LzwConfig) -> Result<Vec<u8>> {
    LzwDecoder::new(config)?.decode(data, expected_size)
}
