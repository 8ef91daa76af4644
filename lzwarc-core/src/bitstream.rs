//! Bit-level I/O for variable-width codes.
//!
//! This module provides [`BitWriter`] and [`BitReader`], which pack and
//! unpack codes of arbitrary width (up to [`MAX_CODE_WIDTH`] bits) onto a
//! byte stream with no byte alignment between codes.
//!
//! # Bit Ordering
//!
//! Codes are packed MSB-first: the most significant bit of a code is written
//! first, and bits fill each output byte from its most significant bit down.
//! The final partial byte is padded with zero bits on the low end.
//!
//! Every writer and reader owns its own [`BitCache`], so two streams handled
//! by the same process (or by two threads) never share buffered bits.
//!
//! # Example
//!
//! ```
//! use lzwarc_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.put_bits(3, 0b101).unwrap();
//! writer.put_bits(9, 0x1AB).unwrap();
//! let output = writer.finish().unwrap();
//! assert_eq!(output.len(), 2);
//!
//! let mut reader = BitReader::new(Cursor::new(output));
//! assert_eq!(reader.get_bits(3).unwrap(), Some(0b101));
//! assert_eq!(reader.get_bits(9).unwrap(), Some(0x1AB));
//! assert_eq!(reader.get_bits(9).unwrap(), None);
//! ```

use crate::error::Result;
use std::io::{ErrorKind, Read, Write};

/// Largest code width the channel accepts: one accumulator word minus a byte.
pub const MAX_CODE_WIDTH: u8 = (u32::BITS - u8::BITS) as u8;

/// Bits buffered between successive variable-width reads or writes.
///
/// Only the low `count` bits of `pending` are meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCache {
    /// Accumulated bits not yet emitted (writer) or not yet returned (reader).
    pub pending: u32,
    /// Number of valid low-order bits in `pending`.
    pub count: u8,
}

#[inline]
fn check_width(width: u8) {
    assert!(
        width > 0 && width <= MAX_CODE_WIDTH,
        "code width {width} outside 1..={MAX_CODE_WIDTH}"
    );
}

/// MSB-first bit writer wrapping any `Write` implementation.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    writer: W,
    cache: BitCache,
    /// Total bits accepted, including bits still in the cache.
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` with an empty cache.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            cache: BitCache::default(),
            bits_written: 0,
        }
    }

    /// Append the low `width` bits of `value` to the stream.
    ///
    /// Whole bytes are written through immediately; leftover bits stay in the
    /// cache until the next call or [`finish`](Self::finish).
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero or larger than [`MAX_CODE_WIDTH`].
    pub fn put_bits(&mut self, width: u8, value: u32) -> Result<()> {
        check_width(width);

        let value = value & ((1u32 << width) - 1);
        self.cache.pending = (self.cache.pending << width) | value;
        self.cache.count += width;
        self.bits_written += u64::from(width);

        while self.cache.count >= 8 {
            self.cache.count -= 8;
            let byte = (self.cache.pending >> self.cache.count) as u8;
            self.writer.write_all(&[byte])?;
            self.cache.pending &= (1u32 << self.cache.count) - 1;
        }

        Ok(())
    }

    /// Total number of bits written so far, including buffered bits.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Number of bytes the stream will occupy once finished.
    pub fn bytes_written(&self) -> u64 {
        self.bits_written.div_ceil(8)
    }

    /// Pad the buffered bits with zeros to a byte boundary, emit them, and
    /// return the underlying writer.
    ///
    /// Consuming `self` guarantees the padding happens exactly once, after
    /// the last [`put_bits`](Self::put_bits).
    pub fn finish(mut self) -> Result<W> {
        if self.cache.count > 0 {
            let byte = (self.cache.pending << (8 - self.cache.count)) as u8;
            self.writer.write_all(&[byte])?;
            self.cache = BitCache::default();
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// MSB-first bit reader wrapping any `Read` implementation.
///
/// Bytes are pulled one at a time, so wrap unbuffered sources in a
/// `BufReader`.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    reader: R,
    cache: BitCache,
    /// Total bits handed out (for error reporting).
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` with an empty cache.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            cache: BitCache::default(),
            bits_read: 0,
        }
    }

    /// Get a mutable reference to the underlying reader.
    ///
    /// Bytes read directly bypass any bits still held in the cache.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Total bits returned by [`get_bits`](Self::get_bits) so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Total bytes pulled from the underlying reader so far.
    pub fn bytes_consumed(&self) -> u64 {
        (self.bits_read + u64::from(self.cache.count)) / 8
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read the next `width`-bit code.
    ///
    /// Returns `Ok(None)` when the input ends before `width` bits are
    /// available. Bits already cached are kept in that case.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero or larger than [`MAX_CODE_WIDTH`].
    pub fn get_bits(&mut self, width: u8) -> Result<Option<u32>> {
        check_width(width);

        while self.cache.count < width {
            let Some(byte) = self.next_byte()? else {
                return Ok(None);
            };
            self.cache.pending = (self.cache.pending << 8) | u32::from(byte);
            self.cache.count += 8;
        }

        self.cache.count -= width;
        let value = self.cache.pending >> self.cache.count;
        self.cache.pending &= (1u32 << self.cache.count) - 1;
        self.bits_read += u64::from(width);

        Ok(Some(value))
    }
}
