//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary in lockstep: it inserts
//! the entry the encoder inserted one code earlier, counts usage the same
//! way, and consults the same [`PrunePolicy`] at the same point, so widths
//! and prunes line up without being signalled in the stream.

use crate::config::LzwConfig;
use crate::dictionary::{Code, CodeTable, EMPTY};
use crate::error::{LzwError, Result};
use crate::prune::{CodecEvent, Growth, PrunePolicy};
use lzwarc_core::{BitReader, StreamKind, copy_raw};
use std::io::{BufReader, BufWriter, Read, Write};

/// Summary of one decode run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Which kind of stream was read.
    pub kind: StreamKind,
    /// Compressed bytes consumed, prefix included.
    pub bytes_read: u64,
    /// Uncompressed bytes written.
    pub bytes_written: u64,
    /// Width changes and prunes, in stream order. Empty for raw streams.
    pub events: Vec<CodecEvent>,
}

/// LZW decoder for decompression.
#[derive(Debug, Clone)]
pub struct LzwDecoder {
    config: LzwConfig,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this decoder was built with.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Decode a stream written by [`LzwEncoder`](crate::LzwEncoder) or
    /// [`write_raw`](lzwarc_core::write_raw), writing at most `max_bytes`
    /// bytes to `output`.
    ///
    /// Raw streams are copied until `max_bytes` or end of input. LZW streams
    /// are decoded until exactly `max_bytes` bytes have been produced; running
    /// out of codes first is [`LzwError::UnexpectedEof`]. With `max_bytes == 0`
    /// no code is read at all.
    pub fn decode_stream<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
        max_bytes: u64,
    ) -> Result<DecodeOutcome> {
        let _span = tracing::debug_span!("lzw_decode", max_bytes).entered();
        let mut reader = BitReader::new(BufReader::new(input));
        let mut output = BufWriter::new(output);

        let kind = StreamKind::read_from(&mut reader)?;
        if kind == StreamKind::Raw {
            let copied = copy_raw(reader.get_mut(), &mut output, max_bytes)?;
            output.flush()?;
            tracing::debug!(bytes_written = copied, "stream is not LZW encoded");
            return Ok(DecodeOutcome {
                kind,
                bytes_read: copied + 1,
                bytes_written: copied,
                events: Vec::new(),
            });
        }

        let mut session = DecodeSession::new(&self.config);
        if max_bytes > 0 {
            session.run(&mut reader, &mut output, max_bytes)?;
        }
        output.flush()?;

        tracing::debug!(
            bytes_read = reader.bytes_consumed(),
            bytes_written = session.written,
            "LZW decode complete"
        );

        Ok(DecodeOutcome {
            kind,
            bytes_read: reader.bytes_consumed(),
            bytes_written: session.written,
            events: session.policy.take_events(),
        })
    }

    /// Decode a byte slice, producing exactly `expected_size` bytes.
    pub fn decode(&self, input: &[u8], expected_size: usize) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(expected_size);
        self.decode_stream(input, &mut output, expected_size as u64)?;
        Ok(output)
    }
}

/// Mutable state of one LZW decode.
struct DecodeSession {
    table: CodeTable,
    policy: PrunePolicy,
    /// Code resolved in the previous step, or `EMPTY` right after a prune.
    previous: Code,
    /// Bytes of the current code's string.
    scratch: Vec<u8>,
    written: u64,
}

impl DecodeSession {
    fn new(config: &LzwConfig) -> Self {
        let table = CodeTable::seeded(config.max_entries());
        let policy = PrunePolicy::new(config, table.len());
        Self {
            table,
            policy,
            previous: EMPTY,
            scratch: Vec::new(),
            written: 0,
        }
    }

    fn run<R: Read, W: Write>(
        &mut self,
        reader: &mut BitReader<R>,
        output: &mut W,
        max_bytes: u64,
    ) -> Result<()> {
        loop {
            let Some(code) = reader.get_bits(self.policy.bits())? else {
                return Err(LzwError::UnexpectedEof {
                    written: self.written,
                    expected: max_bytes,
                    bit_position: reader.bits_read(),
                });
            };

            self.scratch.clear();
            let next_code = self.table.next_code();
            if self.table.contains(code) {
                let first = self.table.resolve_into(code, &mut self.scratch);
                if self.previous != EMPTY {
                    self.table.push(self.previous, first, 0);
                }
            } else if code == next_code && self.previous != EMPTY {
                self.resolve_deferred();
            } else {
                return Err(LzwError::InvalidCode {
                    code,
                    next_code,
                    bit_position: reader.bits_read(),
                });
            }

            let remaining = max_bytes - self.written;
            let take = self.scratch.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
            output.write_all(&self.scratch[..take])?;
            self.written += take as u64;
            if self.written >= max_bytes {
                return Ok(());
            }

            self.previous = code;
            if self.policy.check(self.table.len(), self.written) == Growth::Prune {
                self.table = self.policy.prune(&self.table, self.written);
                self.previous = EMPTY;
            }
        }
    }

    /// The "KwKwK" case: the code is the entry the encoder created from the
    /// previous string plus its own first byte, which this side has not
    /// inserted yet. Its string is the previous string followed by that
    /// string's first byte.
    fn resolve_deferred(&mut self) {
        let first = self.table.resolve_into(self.previous, &mut self.scratch);
        self.scratch.push(first);
        // The encoder walked through the new entry once when it emitted it.
        self.table.push(self.previous, first, 1);
    }
}
