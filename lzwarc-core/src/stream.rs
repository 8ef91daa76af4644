//! Stream-kind prefix and raw passthrough.
//!
//! Every stream produced by a codec starts with one prefix byte telling the
//! reader how to treat the rest of it: [`StreamKind::Lzw`] streams are
//! variable-width code streams, [`StreamKind::Raw`] streams carry the
//! original bytes verbatim. The raw form is what a caller falls back to when
//! compression turned out not to be beneficial.

use crate::bitstream::{BitReader, BitWriter};
use crate::error::{ArcError, Result};
use std::io::{self, Read, Write};

/// Kind of payload that follows the prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Bytes are stored as-is.
    Raw,
    /// Bytes are LZW-compressed.
    Lzw,
}

impl StreamKind {
    /// Prefix byte of a raw passthrough stream.
    pub const RAW_PREFIX: u8 = 0;
    /// Prefix byte of an LZW-compressed stream.
    pub const LZW_PREFIX: u8 = 100;
    /// Width of the prefix in bits.
    pub const PREFIX_BITS: u8 = 8;

    /// The prefix byte for this kind.
    pub fn prefix(self) -> u8 {
        match self {
            Self::Raw => Self::RAW_PREFIX,
            Self::Lzw => Self::LZW_PREFIX,
        }
    }

    /// Parse a prefix byte.
    pub fn from_prefix(prefix: u8) -> Result<Self> {
        match prefix {
            Self::RAW_PREFIX => Ok(Self::Raw),
            Self::LZW_PREFIX => Ok(Self::Lzw),
            other => Err(ArcError::invalid_stream_kind(other)),
        }
    }

    /// Emit the prefix as the first bits of a stream.
    pub fn write_to<W: Write>(self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.put_bits(Self::PREFIX_BITS, u32::from(self.prefix()))
    }

    /// Read and parse the prefix at the start of a stream.
    pub fn read_from<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        match reader.get_bits(Self::PREFIX_BITS)? {
            Some(prefix) => Self::from_prefix(prefix as u8),
            None => Err(ArcError::unexpected_eof(reader.bits_read())),
        }
    }
}

/// Write a raw passthrough stream: the raw prefix followed by all of `input`.
///
/// Returns the number of payload bytes copied.
pub fn write_raw<R: Read, W: Write>(mut input: R, mut output: W) -> Result<u64> {
    output.write_all(&[StreamKind::RAW_PREFIX])?;
    let copied = io::copy(&mut input, &mut output)?;
    output.flush()?;
    tracing::debug!(bytes = copied, "wrote raw passthrough stream");
    Ok(copied)
}

/// Copy the payload of a raw stream whose prefix has already been consumed.
///
/// Stops after `max_bytes` bytes or at end of input, whichever comes first,
/// and returns the number of bytes copied.
pub fn copy_raw<R: Read, W: Write>(input: R, mut output: W, max_bytes: u64) -> Result<u64> {
    if max_bytes == 0 {
        return Ok(0);
    }
    let copied = io::copy(&mut input.take(max_bytes), &mut output)?;
    output.flush()?;
    tracing::debug!(bytes = copied, limit = max_bytes, "copied raw passthrough stream");
    Ok(copied)
}
