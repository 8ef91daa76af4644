//! LZW-specific error types.

use lzwarc_core::ArcError;
use thiserror::Error;

/// LZW compression/decompression errors.
///
/// Every variant except `InvalidConfig` and `Io` means the compressed stream
/// is corrupted (or was produced with a different configuration).
#[derive(Debug, Error)]
pub enum LzwError {
    /// A code outside `1..=next_code` (or a deferred code with nothing pending).
    #[error("Invalid LZW code {code} (next code {next_code}) at bit position {bit_position}")]
    InvalidCode {
        /// The code that was read.
        code: u32,
        /// The code the dictionary would assign next.
        next_code: u32,
        /// Bit position just after the code.
        bit_position: u64,
    },

    /// The code stream ended before the expected output size was reached.
    #[error("File ended unexpectedly: wrote {written} of {expected} bytes (bit position {bit_position})")]
    UnexpectedEof {
        /// Bytes produced before the input ran out.
        written: u64,
        /// Bytes the caller expected.
        expected: u64,
        /// Bit position where the input ran out.
        bit_position: u64,
    },

    /// Invalid configuration.
    #[error(
        "Invalid LZW configuration: bits {min_bits}..={max_bits}, prune threshold {prune_threshold}"
    )]
    InvalidConfig {
        /// Requested code-width floor.
        min_bits: u8,
        /// Requested code-width ceiling.
        max_bits: u8,
        /// Requested pruning threshold.
        prune_threshold: i64,
    },

    /// Error from the shared stream layer (prefix, bit channel).
    #[error(transparent)]
    Core(#[from] ArcError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
