//! LZW dictionary (string table) management.
//!
//! Entries are stored once, in code order, in a [`CodeTable`]. That is the
//! index view used to walk prefix chains while decoding and pruning. The
//! encoder needs `(prefix, byte) -> code` lookups instead, so it works on a
//! [`StringTable`]: the same `CodeTable` plus a hash index over it. Converting
//! between the two is explicit and lossless, and only the owner of the
//! current view can insert, so the views never disagree.

use std::collections::HashMap;

/// Integer handle for a dictionary entry.
pub type Code = u32;

/// Reserved "no prefix" code. Never transmitted.
pub const EMPTY: Code = 0;

/// Number of single-byte root entries every dictionary starts with.
pub const ROOT_COUNT: usize = 256;

/// Code of the root entry for `byte`.
#[inline]
pub fn root_code(byte: u8) -> Code {
    Code::from(byte) + 1
}

/// One dictionary entry: the string of `prefix` extended by `byte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Code of the string this entry extends, or [`EMPTY`] for a root.
    pub prefix: Code,
    /// Final byte of the represented string.
    pub byte: u8,
    /// How often the entry has been referenced since it was created or last
    /// pruned.
    pub usage: i64,
}

impl Entry {
    /// Whether this entry is a single-byte root.
    pub fn is_root(&self) -> bool {
        self.prefix == EMPTY
    }
}

/// Index view of the dictionary: entry for code `c` lives at `c - 1`.
#[derive(Debug, Clone)]
pub struct CodeTable {
    entries: Vec<Entry>,
    /// Hard cap on the number of entries.
    limit: usize,
}

impl CodeTable {
    /// Create a table with no entries, not even roots.
    pub fn empty(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Create a table holding the 256 single-byte roots (codes 1..=256).
    pub fn seeded(limit: usize) -> Self {
        assert!(limit > ROOT_COUNT, "limit {limit} leaves no room past the roots");
        let mut table = Self {
            entries: Vec::with_capacity(limit.min(1 << 16)),
            limit,
        };
        for byte in 0..=u8::MAX {
            table.push(EMPTY, byte, 0);
        }
        table
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether another entry would exceed the limit.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    /// The code the next inserted entry will receive.
    pub fn next_code(&self) -> Code {
        self.entries.len() as Code + 1
    }

    /// Whether `code` names an existing entry.
    pub fn contains(&self, code: Code) -> bool {
        code != EMPTY && (code as usize) <= self.entries.len()
    }

    /// Get the entry for a code.
    pub fn get(&self, code: Code) -> Option<&Entry> {
        if code == EMPTY {
            return None;
        }
        self.entries.get(code as usize - 1)
    }

    /// All entries in code order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Append an entry and return its code.
    ///
    /// # Panics
    ///
    /// Panics if the table is full or if `prefix` does not name an earlier
    /// entry. Both mean the caller skipped the width/pruning policy.
    pub fn push(&mut self, prefix: Code, byte: u8, usage: i64) -> Code {
        assert!(
            !self.is_full(),
            "insert into full dictionary ({} entries) without pruning",
            self.limit
        );
        let code = self.next_code();
        assert!(prefix < code, "prefix {prefix} must precede code {code}");
        self.entries.push(Entry {
            prefix,
            byte,
            usage,
        });
        code
    }

    /// Increment the usage counter of an existing entry.
    #[inline]
    pub fn bump(&mut self, code: Code) {
        self.entries[code as usize - 1].usage += 1;
    }

    /// First byte of the string for `code`, walking the chain without side
    /// effects.
    pub fn first_byte(&self, mut code: Code) -> u8 {
        loop {
            let entry = &self.entries[code as usize - 1];
            if entry.is_root() {
                return entry.byte;
            }
            code = entry.prefix;
        }
    }

    /// Append the string for `code` to `out`, bumping the usage of every
    /// entry on the chain. Returns the first byte of the string.
    ///
    /// The chain is walked iteratively, so arbitrarily long strings cost no
    /// stack depth.
    ///
    /// # Panics
    ///
    /// Panics if `code` is not in the table.
    pub fn resolve_into(&mut self, mut code: Code, out: &mut Vec<u8>) -> u8 {
        let start = out.len();
        while code != EMPTY {
            let entry = &mut self.entries[code as usize - 1];
            entry.usage += 1;
            out.push(entry.byte);
            code = entry.prefix;
        }
        out[start..].reverse();
        out[start]
    }

    /// The string for `code`, without touching usage counters.
    pub fn string_for(&self, mut code: Code) -> Option<Vec<u8>> {
        if !self.contains(code) {
            return None;
        }
        let mut bytes = Vec::new();
        while code != EMPTY {
            let entry = &self.entries[code as usize - 1];
            bytes.push(entry.byte);
            code = entry.prefix;
        }
        bytes.reverse();
        Some(bytes)
    }

    /// Check that no entry references itself or a later code.
    pub fn is_consistent(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, entry)| (entry.prefix as usize) <= i)
    }

    /// Build the lookup view over this table.
    pub fn into_string_table(self) -> StringTable {
        let mut index = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            index.insert((entry.prefix, entry.byte), i as Code + 1);
        }
        StringTable { table: self, index }
    }
}

/// Lookup view of the dictionary: `(prefix, byte) -> code`.
#[derive(Debug, Clone)]
pub struct StringTable {
    table: CodeTable,
    index: HashMap<(Code, u8), Code>,
}

impl StringTable {
    /// Create a lookup table holding the 256 single-byte roots.
    pub fn seeded(limit: usize) -> Self {
        CodeTable::seeded(limit).into_string_table()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The code the next inserted entry will receive.
    pub fn next_code(&self) -> Code {
        self.table.next_code()
    }

    /// Code of the string `prefix + byte`, if present.
    #[inline]
    pub fn lookup(&self, prefix: Code, byte: u8) -> Option<Code> {
        self.index.get(&(prefix, byte)).copied()
    }

    /// Insert the string `prefix + byte` and return its new code.
    ///
    /// # Panics
    ///
    /// Same conditions as [`CodeTable::push`].
    pub fn insert(&mut self, prefix: Code, byte: u8, usage: i64) -> Code {
        let code = self.table.push(prefix, byte, usage);
        let previous = self.index.insert((prefix, byte), code);
        debug_assert!(previous.is_none(), "duplicate entry ({prefix}, {byte})");
        code
    }

    /// Increment the usage counter of an existing entry.
    #[inline]
    pub fn bump(&mut self, code: Code) {
        self.table.bump(code);
    }

    /// Read-only access to the entries in code order.
    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Drop the hash index and return the index view.
    pub fn into_code_table(self) -> CodeTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_roots() {
        let table = CodeTable::seeded(511);
        assert_eq!(table.len(), 256);
        assert_eq!(table.next_code(), 257);
        for byte in 0..=255u8 {
            let entry = table.get(root_code(byte)).unwrap();
            assert!(entry.is_root());
            assert_eq!(entry.byte, byte);
            assert_eq!(entry.usage, 0);
        }
        assert!(table.get(EMPTY).is_none());
        assert!(table.get(257).is_none());
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = StringTable::seeded(511);
        let a = root_code(b'A');
        assert_eq!(table.lookup(EMPTY, b'A'), Some(a));
        assert_eq!(table.lookup(a, b'B'), None);

        let ab = table.insert(a, b'B', 0);
        assert_eq!(ab, 257);
        assert_eq!(table.lookup(a, b'B'), Some(ab));

        let abc = table.insert(ab, b'C', 0);
        assert_eq!(abc, 258);
        assert_eq!(table.code_table().string_for(abc).unwrap(), b"ABC");
    }

    #[test]
    fn test_resolve_bumps_whole_chain() {
        let mut table = CodeTable::seeded(511);
        let x = root_code(b'X');
        let xy = table.push(x, b'Y', 0);
        let xyz = table.push(xy, b'Z', 0);

        let mut out = b"prefix:".to_vec();
        let first = table.resolve_into(xyz, &mut out);
        assert_eq!(first, b'X');
        assert_eq!(out, b"prefix:XYZ");

        assert_eq!(table.get(x).unwrap().usage, 1);
        assert_eq!(table.get(xy).unwrap().usage, 1);
        assert_eq!(table.get(xyz).unwrap().usage, 1);
        assert_eq!(table.get(root_code(b'Y')).unwrap().usage, 0);
    }

    #[test]
    fn test_first_byte_has_no_side_effects() {
        let mut table = CodeTable::seeded(511);
        let q = root_code(b'Q');
        let qr = table.push(q, b'R', 0);
        assert_eq!(table.first_byte(qr), b'Q');
        assert_eq!(table.get(qr).unwrap().usage, 0);
        assert_eq!(table.get(q).unwrap().usage, 0);
    }

    #[test]
    fn test_views_convert_losslessly() {
        let mut strings = StringTable::seeded(1023);
        let h = root_code(b'h');
        let hi = strings.insert(h, b'i', 3);
        strings.bump(hi);
        let his = strings.insert(hi, b's', 0);

        let codes = strings.into_code_table();
        assert_eq!(codes.len(), 258);
        assert_eq!(codes.get(hi).unwrap().usage, 4);
        assert!(codes.is_consistent());

        let strings = codes.clone().into_string_table();
        assert_eq!(strings.lookup(h, b'i'), Some(hi));
        assert_eq!(strings.lookup(hi, b's'), Some(his));
        assert_eq!(strings.code_table().entries(), codes.entries());
    }

    #[test]
    fn test_long_chain_resolves_iteratively() {
        let mut table = CodeTable::seeded(200_000);
        let mut code = root_code(b'a');
        for _ in 0..150_000 {
            code = table.push(code, b'a', 0);
        }
        let mut out = Vec::new();
        table.resolve_into(code, &mut out);
        assert_eq!(out.len(), 150_001);
        assert!(out.iter().all(|&b| b == b'a'));
    }

    #[test]
    #[should_panic(expected = "without pruning")]
    fn test_insert_into_full_table_panics() {
        let mut table = CodeTable::seeded(257);
        table.push(root_code(b'a'), b'b', 0);
        table.push(root_code(b'a'), b'c', 0);
    }

    #[test]
    #[should_panic(expected = "must precede")]
    fn test_forward_prefix_panics() {
        let mut table = CodeTable::seeded(511);
        table.push(300, b'a', 0);
    }
}
