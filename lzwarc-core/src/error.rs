//! Error types shared by the lzwarc codecs.
//!
//! Only conditions caused by the byte stream (or the transport underneath
//! it) live here. Contract violations inside a codec are panics, not errors.

use std::io;
use thiserror::Error;

/// The main error type for lzwarc stream operations.
#[derive(Debug, Error)]
pub enum ArcError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input ended before a required value could be read.
    #[error("Unexpected end of stream at bit position {bit_position}")]
    UnexpectedEof {
        /// Bit position where the stream ran out.
        bit_position: u64,
    },

    /// The leading stream-kind byte is neither the raw nor the compressed marker.
    #[error("Invalid stream kind prefix: {found}")]
    InvalidStreamKind {
        /// The prefix byte that was read.
        found: u8,
    },
}

/// Result type alias for lzwarc stream operations.
pub type Result<T> = std::result::Result<T, ArcError>;

impl ArcError {
    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Create an invalid stream kind error.
    pub fn invalid_stream_kind(found: u8) -> Self {
        Self::InvalidStreamKind { found }
    }
}
