//! Code-width growth and usage-driven pruning.
//!
//! Encoder and decoder consult the same [`PrunePolicy`] right before each new
//! code would be assigned. The width grows by one bit whenever that code
//! would not fit. Once the width is at `max_bits`, the table is pruned
//! instead: rarely used entries are dropped and the survivors renumbered, so
//! an unbounded stream stays inside a fixed code-width budget.
//!
//! Both sides see the same table, the same usage counts, and the same
//! offsets, so they grow and prune at exactly the same point without any
//! signal in the stream.

use crate::config::LzwConfig;
use crate::dictionary::{Code, CodeTable, EMPTY};

/// A width change recorded while encoding or decoding.
///
/// `offset` counts uncompressed bytes: consumed by the encoder, produced by
/// the decoder. Matching streams yield identical event lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecEvent {
    /// The code width grew to `bits`.
    Grew {
        /// Uncompressed offset at which the width changed.
        offset: u64,
        /// New code width.
        bits: u8,
    },
    /// The dictionary was pruned from `before` to `after` entries.
    Pruned {
        /// Uncompressed offset at which the prune happened.
        offset: u64,
        /// Entry count before pruning.
        before: usize,
        /// Entry count after pruning.
        after: usize,
        /// Code width after pruning.
        bits: u8,
    },
}

/// Smallest width, not below `floor`, in which `code` fits.
pub fn min_width(code: usize, floor: u8) -> u8 {
    let mut bits = floor;
    while (1usize << bits) <= code {
        bits += 1;
    }
    bits
}

/// Result of pruning a table.
#[derive(Debug, Clone)]
pub struct Pruned {
    /// The rebuilt table.
    pub table: CodeTable,
    /// `mapping[old_code]` is the new code, or [`EMPTY`] if dropped.
    pub mapping: Vec<Code>,
}

/// Rebuild `table` keeping roots, entries used more than `threshold` times,
/// and every ancestor of a kept entry. Survivors keep their relative order
/// and get dense codes; usage above the threshold is reduced by it.
pub fn prune(table: &CodeTable, threshold: i64) -> Pruned {
    let entries = table.entries();

    // Prefixes always precede their extensions, so a single backwards sweep
    // marks every ancestor of a kept entry.
    let mut keep = vec![false; entries.len() + 1];
    for (i, entry) in entries.iter().enumerate().rev() {
        let code = i + 1;
        if entry.is_root() || entry.usage > threshold {
            keep[code] = true;
        }
        if keep[code] && entry.prefix != EMPTY {
            keep[entry.prefix as usize] = true;
        }
    }

    let mut pruned = CodeTable::empty(table.limit());
    let mut mapping = vec![EMPTY; entries.len() + 1];
    for (i, entry) in entries.iter().enumerate() {
        let code = i + 1;
        if !keep[code] {
            continue;
        }
        let usage = if entry.usage > threshold {
            entry.usage - threshold
        } else {
            entry.usage
        };
        mapping[code] = pruned.push(mapping[entry.prefix as usize], entry.byte, usage);
    }

    Pruned {
        table: pruned,
        mapping,
    }
}

/// What to do before assigning the next code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    /// The next code fits at the current width.
    Fits,
    /// The width grew to the contained value; the code now fits.
    Grew(u8),
    /// The width is at its ceiling; the table must be pruned instead.
    Prune,
}

/// Shared width and pruning state of one encode or decode run.
#[derive(Debug)]
pub struct PrunePolicy {
    bits: u8,
    min_bits: u8,
    max_bits: u8,
    threshold: i64,
    events: Vec<CodecEvent>,
}

impl PrunePolicy {
    /// Start a run over a table currently holding `len` entries.
    pub fn new(config: &LzwConfig, len: usize) -> Self {
        Self {
            bits: min_width(len + 1, config.min_bits),
            min_bits: config.min_bits,
            max_bits: config.max_bits,
            threshold: config.prune_threshold,
            events: Vec::new(),
        }
    }

    /// Current code width.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[CodecEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the list empty.
    pub fn take_events(&mut self) -> Vec<CodecEvent> {
        std::mem::take(&mut self.events)
    }

    /// Call right before assigning code `len + 1`.
    pub fn check(&mut self, len: usize, offset: u64) -> Growth {
        if len + 1 < (1usize << self.bits) {
            return Growth::Fits;
        }
        if self.bits >= self.max_bits {
            return Growth::Prune;
        }
        self.bits += 1;
        tracing::trace!(offset, bits = self.bits, "LZW code width grew");
        self.events.push(CodecEvent::Grew {
            offset,
            bits: self.bits,
        });
        Growth::Grew(self.bits)
    }

    /// Prune `table` after [`check`](Self::check) returned
    /// [`Growth::Prune`], and shrink the width to fit the survivors.
    pub fn prune(&mut self, table: &CodeTable, offset: u64) -> CodeTable {
        let before = table.len();
        let Pruned { table, .. } = prune(table, self.threshold);
        debug_assert!(table.len() < before, "pruning dropped nothing");

        self.bits = min_width(table.len() + 1, self.min_bits);
        tracing::debug!(
            offset,
            kept = table.len(),
            total = before,
            bits = self.bits,
            "LZW table pruned"
        );
        self.events.push(CodecEvent::Pruned {
            offset,
            before,
            after: table.len(),
            bits: self.bits,
        });
        table
    }
}
