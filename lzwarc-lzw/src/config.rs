//! LZW configuration: code-width floor and ceiling, pruning threshold.

use crate::error::{LzwError, Result};
use lzwarc_core::MAX_CODE_WIDTH;

/// Smallest ceiling that leaves room for the 256 seeded roots plus one code.
pub const MIN_MAX_BITS: u8 = 9;

/// LZW configuration parameters.
///
/// The configuration is not stored in the stream: encoder and decoder must
/// be built from the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Floor of the code width in bits.
    pub min_bits: u8,
    /// Ceiling of the code width in bits. Reaching it triggers pruning.
    pub max_bits: u8,
    /// Entries used more often than this survive a prune.
    pub prune_threshold: i64,
}

impl LzwConfig {
    /// Default configuration: 9-16 bit codes, prune entries used at most once.
    pub const DEFAULT: Self = Self {
        min_bits: 9,
        max_bits: 16,
        prune_threshold: 1,
    };

    /// Widest codes the bit channel supports (9-24 bits).
    ///
    /// Large tables help on big, diverse archives at the cost of memory.
    pub const WIDE: Self = Self {
        min_bits: 9,
        max_bits: MAX_CODE_WIDTH,
        prune_threshold: 1,
    };

    /// Small tables (9-12 bit codes) that prune often.
    pub const COMPACT: Self = Self {
        min_bits: 9,
        max_bits: 12,
        prune_threshold: 1,
    };

    /// Create a new configuration with the default pruning threshold.
    pub fn new(min_bits: u8, max_bits: u8) -> Self {
        Self {
            min_bits,
            max_bits,
            prune_threshold: Self::DEFAULT.prune_threshold,
        }
    }

    /// Replace the pruning threshold.
    pub fn with_prune_threshold(mut self, prune_threshold: i64) -> Self {
        self.prune_threshold = prune_threshold;
        self
    }

    /// Check that the parameters describe a codec that always makes progress.
    pub fn validate(&self) -> Result<()> {
        let valid = self.min_bits > 0
            && self.min_bits <= self.max_bits
            && (MIN_MAX_BITS..=MAX_CODE_WIDTH).contains(&self.max_bits)
            && self.prune_threshold >= 1;
        if valid {
            Ok(())
        } else {
            Err(LzwError::InvalidConfig {
                min_bits: self.min_bits,
                max_bits: self.max_bits,
                prune_threshold: self.prune_threshold,
            })
        }
    }

    /// Maximum number of dictionary entries before a prune is forced.
    pub fn max_entries(&self) -> usize {
        (1usize << self.max_bits) - 1
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
