//! LZW encoder (compression).

use crate::config::LzwConfig;
use crate::dictionary::{EMPTY, StringTable, root_code};
use crate::error::Result;
use crate::prune::{CodecEvent, Growth, PrunePolicy};
use lzwarc_core::{BitWriter, StreamKind};
use std::io::{BufReader, BufWriter, Read, Write};

/// Summary of one encode run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutcome {
    /// Uncompressed bytes consumed.
    pub bytes_read: u64,
    /// Compressed bytes written, prefix and padding included.
    pub bytes_written: u64,
    /// Whether the compressed stream is no larger than the input.
    ///
    /// When `false` the caller should discard the output and store the input
    /// as a raw stream instead; the output was still written in full.
    pub beneficial: bool,
    /// Width changes and prunes, in stream order.
    pub events: Vec<CodecEvent>,
}

/// Encoded bytes together with their [`EncodeOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The compressed stream.
    pub data: Vec<u8>,
    /// Statistics of the run.
    pub outcome: EncodeOutcome,
}

/// LZW encoder for compression.
///
/// All dictionary and bit-cache state is created per call, so one encoder
/// can process any number of streams one after another.
#[derive(Debug, Clone)]
pub struct LzwEncoder {
    config: LzwConfig,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this encoder was built with.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Encode `input` to exhaustion and write the compressed stream to
    /// `output`.
    ///
    /// # Algorithm
    ///
    /// 1. Write the LZW stream-kind prefix.
    /// 2. Greedily extend the current match `C` while `C + K` is in the
    ///    dictionary, bumping the usage of every entry walked.
    /// 3. On a miss, emit `C`, then either insert `C + K` or, if the width is
    ///    already at its ceiling, prune the dictionary and skip the insert.
    /// 4. Restart the match at the root entry for `K`.
    /// 5. At end of input emit the pending match and pad to a byte.
    pub fn encode_stream<R: Read, W: Write>(&self, input: R, output: W) -> Result<EncodeOutcome> {
        let _span = tracing::debug_span!("lzw_encode", max_bits = self.config.max_bits).entered();
        let mut writer = BitWriter::new(BufWriter::new(output));
        StreamKind::Lzw.write_to(&mut writer)?;

        let mut table = StringTable::seeded(self.config.max_entries());
        let mut policy = PrunePolicy::new(&self.config, table.len());

        let mut current = EMPTY;
        let mut bytes_read = 0u64;
        for byte in BufReader::new(input).bytes() {
            let byte = byte?;
            let offset = bytes_read;
            bytes_read += 1;

            if let Some(code) = table.lookup(current, byte) {
                table.bump(code);
                current = code;
                continue;
            }

            // Roots are always present, so a miss always has a match to flush.
            writer.put_bits(policy.bits(), current)?;

            match policy.check(table.len(), offset) {
                Growth::Prune => {
                    let codes = table.into_code_table();
                    table = policy.prune(&codes, offset).into_string_table();
                }
                Growth::Fits | Growth::Grew(_) => {
                    table.insert(current, byte, 0);
                }
            }

            current = root_code(byte);
            table.bump(current);
        }

        if current != EMPTY {
            writer.put_bits(policy.bits(), current)?;
        }

        let bytes_written = writer.bytes_written();
        writer.finish()?;

        let beneficial = bytes_written <= bytes_read;
        if beneficial {
            tracing::debug!(bytes_read, bytes_written, "LZW encode complete");
        } else {
            tracing::debug!(
                bytes_read,
                bytes_written,
                "LZW output larger than input, use uncompressed stream"
            );
        }

        Ok(EncodeOutcome {
            bytes_read,
            bytes_written,
            beneficial,
            events: policy.take_events(),
        })
    }

    /// Encode a byte slice into a new buffer.
    ///
    /// The buffer always holds the LZW stream, even when
    /// [`EncodeOutcome::beneficial`] is `false`.
    pub fn encode(&self, input: &[u8]) -> Result<Encoded> {
        let mut data = Vec::with_capacity(input.len() / 2 + 1);
        let outcome = self.encode_stream(input, &mut data)?;
        Ok(Encoded { data, outcome })
    }
}
