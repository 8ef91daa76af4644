//! # lzwarc Core
//!
//! Core components shared by the lzwarc codecs.
//!
//! - [`bitstream`]: MSB-first bit I/O for variable-width codes
//! - [`stream`]: Stream-kind prefix and raw passthrough
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Archive walker, cipher, CRC (external collaborators)    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec: adaptive LZW with usage-driven pruning           │
//! ├─────────────────────────────────────────────────────────┤
//! │ Stream kind prefix, Bit Channel (this crate)            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lzwarc_core::bitstream::{BitReader, BitWriter};
//! use lzwarc_core::stream::StreamKind;
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! StreamKind::Lzw.write_to(&mut writer).unwrap();
//! writer.put_bits(12, 0xABC).unwrap();
//! let data = writer.finish().unwrap();
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(StreamKind::read_from(&mut reader).unwrap(), StreamKind::Lzw);
//! assert_eq!(reader.get_bits(12).unwrap(), Some(0xABC));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod stream;

// Re-exports for convenience
pub use bitstream::{BitCache, BitReader, BitWriter, MAX_CODE_WIDTH};
pub use error::{ArcError, Result};
pub use stream::{StreamKind, copy_raw, write_raw};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{ArcError, Result};
    pub use crate::stream::StreamKind;
}
