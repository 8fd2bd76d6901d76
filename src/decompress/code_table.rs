//! Prefix/suffix dictionary for LZW decoding.
//!
//! Stored as two aligned arrays indexed by code. Entries are only ever
//! appended; a CLEAR truncates back to the literal entries.

use super::{DecompressError, Result, CLEAR_CODE};

/// Number of literal codes (one per byte value).
const LITERALS: u32 = 256;

/// The adaptive LZW dictionary.
pub struct CodeTable {
    /// `prefix[c]` is the code whose string `c` extends.
    prefix: Vec<u16>,
    /// `suffix[c]` is the byte `c` appends to its prefix.
    suffix: Vec<u8>,
    /// Code 256 is reserved for CLEAR.
    block_mode: bool,
    /// `1 << max_bits`
    capacity: u32,
}

impl CodeTable {
    /// Create a table holding only the literal (and, in block mode, CLEAR) entries.
    pub fn new(max_bits: u32, block_mode: bool) -> Self {
        debug_assert!(max_bits <= 16);
        let capacity = 1u32 << max_bits;
        let mut table = Self {
            prefix: Vec::with_capacity(capacity as usize),
            suffix: Vec::with_capacity(capacity as usize),
            block_mode,
            capacity,
        };
        table.reset();
        table
    }

    /// Drop every learned entry.
    pub fn reset(&mut self) {
        self.prefix.clear();
        self.suffix.clear();
        self.prefix.resize(LITERALS as usize, 0);
        self.suffix.extend(0..=u8::MAX);
        if self.block_mode {
            // Placeholder for CLEAR; never expanded.
            self.prefix.push(0);
            self.suffix.push(0);
        }
    }

    /// First code a fresh table learns.
    pub fn first_free(&self) -> u32 {
        if self.block_mode {
            LITERALS + 1
        } else {
            LITERALS
        }
    }

    /// The code the next [`learn`](Self::learn) assigns.
    #[inline]
    pub fn next_code(&self) -> u32 {
        self.prefix.len() as u32
    }

    /// Maximum number of entries (`2^max_bits`).
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Check if no further entries can be learned.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.next_code() >= self.capacity
    }

    /// Check if `code` has an expansion.
    #[inline]
    pub fn contains(&self, code: u32) -> bool {
        code < self.next_code() && !(self.block_mode && code == CLEAR_CODE)
    }

    /// Append `prefix + suffix` as a new entry.
    ///
    /// Returns the assigned code, or `None` once the table is full.
    #[inline]
    pub fn learn(&mut self, prefix: u32, suffix: u8) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        debug_assert!(prefix < self.next_code());
        let code = self.next_code();
        self.prefix.push(prefix as u16);
        self.suffix.push(suffix);
        Some(code)
    }

    /// Append the expansion of `code` to `out` and return its first byte.
    ///
    /// Walks the prefix chain from `code` back to a literal, then reverses
    /// the bytes collected on the way.
    pub fn expand_into(&self, code: u32, out: &mut Vec<u8>) -> Result<u8> {
        if !self.contains(code) {
            return Err(DecompressError::CorruptChain { code });
        }

        let start = out.len();
        let mut cur = code;
        let mut steps = 0u32;
        while cur >= LITERALS {
            // A chain longer than the table can only be a cycle.
            if steps >= self.capacity || !self.contains(cur) {
                out.truncate(start);
                return Err(DecompressError::CorruptChain { code });
            }
            out.push(self.suffix[cur as usize]);
            cur = self.prefix[cur as usize] as u32;
            steps += 1;
        }
        out.push(cur as u8);

        out[start..].reverse();
        Ok(out[start])
    }

    /// Expand `code` into a fresh byte vector.
    pub fn lookup_chain(&self, code: u32) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.expand_into(code, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_entries() {
        let table = CodeTable::new(16, true);
        assert_eq!(table.next_code(), 257);
        assert_eq!(table.first_free(), 257);
        assert_eq!(table.capacity(), 65536);
        assert!(table.contains(255));
        assert!(!table.contains(CLEAR_CODE));

        let table = CodeTable::new(12, false);
        assert_eq!(table.next_code(), 256);
        assert_eq!(table.lookup_chain(0x41).unwrap(), b"A");
    }

    #[test]
    fn test_learn_and_expand() {
        let mut table = CodeTable::new(12, true);

        let ab = table.learn(b'a' as u32, b'b').unwrap();
        let abc = table.learn(ab, b'c').unwrap();
        let abcc = table.learn(abc, b'c').unwrap();
        assert_eq!((ab, abc, abcc), (257, 258, 259));

        assert_eq!(table.lookup_chain(abcc).unwrap(), b"abcc");

        let mut out = b"xy".to_vec();
        let first = table.expand_into(abc, &mut out).unwrap();
        assert_eq!(first, b'a');
        assert_eq!(out, b"xyabc");
    }

    #[test]
    fn test_learn_stops_at_capacity() {
        let mut table = CodeTable::new(9, false);
        for i in 0..256 {
            assert_eq!(table.learn(i, b'x'), Some(256 + i));
        }
        assert!(table.is_full());
        assert_eq!(table.learn(0, b'y'), None);
        assert_eq!(table.next_code(), 512);
        assert_eq!(table.lookup_chain(511).unwrap(), vec![255, b'x']);
    }

    #[test]
    fn test_reset() {
        let mut table = CodeTable::new(12, true);
        let code = table.learn(b'a' as u32, b'a').unwrap();
        table.learn(code, b'a').unwrap();
        assert_eq!(table.next_code(), 259);

        table.reset();
        assert_eq!(table.next_code(), 257);
        assert!(!table.contains(code));
        assert_eq!(table.lookup_chain(b'z' as u32).unwrap(), b"z");
    }

    #[test]
    fn test_unknown_code_is_corrupt() {
        let table = CodeTable::new(12, true);
        assert!(matches!(
            table.lookup_chain(300),
            Err(DecompressError::CorruptChain { code: 300 })
        ));
        assert!(matches!(
            table.lookup_chain(CLEAR_CODE),
            Err(DecompressError::CorruptChain { .. })
        ));
    }

    #[test]
    fn test_failed_expansion_leaves_output_untouched() {
        let mut table = CodeTable::new(12, false);
        let code = table.learn(b'q' as u32, b'r').unwrap();
        // Point the entry at itself to build a cycle.
        table.prefix[code as usize] = code as u16;

        let mut out = b"ok".to_vec();
        assert!(table.expand_into(code, &mut out).is_err());
        assert_eq!(out, b"ok");
    }
}
