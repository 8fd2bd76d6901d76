//! Bit reader for `.Z` code streams.
//!
//! Reads codes LSB first: bit 0 of each byte is the lowest bit of its
//! contribution to a code, and bytes are consumed in stream order.

use super::Result;
use std::io::{ErrorKind, Read};

/// Bytes requested from the source per refill.
const REFILL_SIZE: usize = 8192;

/// Bit reader that pulls fixed-width codes from a byte source.
pub struct BitReader<R> {
    source: R,
    buf: Vec<u8>,
    /// Bit cursor into `buf`. May point past the end after an alignment skip.
    bit_pos: usize,
    /// Bits dropped from the front of `buf` by earlier refills.
    base_bits: u64,
    eof: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a bit reader over `source`.
    pub fn new(source: R) -> Self {
        Self::with_buffered(source, Vec::new())
    }

    /// Create a bit reader whose first bytes were already pulled from `source`.
    pub fn with_buffered(source: R, buffered: Vec<u8>) -> Self {
        Self {
            source,
            buf: buffered,
            bit_pos: 0,
            base_bits: 0,
            eof: false,
        }
    }

    /// Read the next `width`-bit code.
    ///
    /// Returns `Ok(None)` once the source is exhausted and fewer than
    /// `width` bits remain.
    #[inline]
    pub fn read_code(&mut self, width: u32) -> Result<Option<u32>> {
        debug_assert!((1..=16).contains(&width));
        let width_bits = width as usize;

        while self.bit_pos + width_bits > self.buf.len() * 8 {
            if !self.refill()? {
                return Ok(None);
            }
        }

        // A code of up to 16 bits at any bit offset spans at most 3 bytes.
        let i = self.bit_pos / 8;
        let mut word = self.buf[i] as u32;
        if let Some(&b) = self.buf.get(i + 1) {
            word |= (b as u32) << 8;
        }
        if let Some(&b) = self.buf.get(i + 2) {
            word |= (b as u32) << 16;
        }

        let code = (word >> (self.bit_pos % 8)) & ((1 << width) - 1);
        self.bit_pos += width_bits;
        Ok(Some(code))
    }

    /// Advance to the next multiple of `group_bits`, counted from `origin`.
    ///
    /// Does nothing when the cursor already sits on a group boundary.
    pub fn align_to_group(&mut self, origin: u64, group_bits: u64) {
        debug_assert!(origin <= self.position());
        let rem = (self.position() - origin) % group_bits;
        if rem != 0 {
            self.bit_pos += (group_bits - rem) as usize;
        }
    }

    /// Drop consumed bytes, keep the unconsumed tail and append fresh input.
    ///
    /// Returns `false` when the source has nothing more to give.
    fn refill(&mut self) -> Result<bool> {
        if self.eof {
            return Ok(false);
        }

        let consumed = (self.bit_pos / 8).min(self.buf.len());
        self.buf.drain(..consumed);
        self.base_bits += consumed as u64 * 8;
        self.bit_pos -= consumed * 8;

        let filled = self.buf.len();
        self.buf.resize(filled + REFILL_SIZE, 0);
        let read = loop {
            match self.source.read(&mut self.buf[filled..]) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                other => break other,
            }
        };

        match read {
            Ok(n) => {
                self.buf.truncate(filled + n);
                if n == 0 {
                    self.eof = true;
                }
                Ok(n > 0)
            }
            Err(e) => {
                self.buf.truncate(filled);
                Err(e.into())
            }
        }
    }

    /// Get the current bit position, counted from the first buffered byte.
    pub fn position(&self) -> u64 {
        self.base_bits + self.bit_pos as u64
    }

    /// Check if the source is exhausted.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Whether the bytes left behind the last whole code carry data.
    ///
    /// More than one stray byte, or one stray byte with any unread bit set,
    /// means the final code was cut off. Only meaningful after
    /// [`read_code`](Self::read_code) has returned `Ok(None)`.
    pub fn has_trailing_bits(&self) -> bool {
        let tail = self.buf.get(self.bit_pos / 8..).unwrap_or(&[]);
        match tail {
            [] => false,
            [last] => (*last >> (self.bit_pos % 8)) != 0,
            _ => true,
        }
    }
}
