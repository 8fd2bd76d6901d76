//! LZW decoder for `.Z` streams.
//!
//! Drives [`BitReader`] and [`CodeTable`] through an explicit state machine:
//!
//! ```text
//! AwaitingFirstCode → SteadyState → (Cleared → SteadyState)* → Done
//! ```
//!
//! Any error moves the decoder to `Failed`, after which it reads nothing more.

use super::{
    BitReader, CodeTable, DecodeOptions, DecodeSummary, DecompressError, Result, CLEAR_CODE,
    INIT_BITS,
};
use crate::parsing::{Header, HeaderParser};
use log::{debug, info, trace, warn};
use std::io::{Read, Write};

/// Decoded bytes are handed to the sink in chunks of about this size.
const FLUSH_THRESHOLD: usize = 64 * 1024;

/// Where the decoder is in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// No code read yet. The first code must be a literal.
    AwaitingFirstCode,
    /// Ordinary decoding: every code learns one table entry.
    SteadyState,
    /// A CLEAR was just read. The next code is decoded but learns nothing.
    Cleared,
    /// Input exhausted.
    Done,
    /// A fatal error was returned. No further codes are read.
    Failed,
}

/// Streaming `.Z` decoder.
///
/// Owns its bit reader and code table for the whole decode. Construct one
/// per stream.
pub struct LzwDecoder<R> {
    reader: BitReader<R>,
    table: CodeTable,
    header: Header,
    options: DecodeOptions,
    state: DecoderState,
    /// Current code width.
    n_bits: u32,
    /// Once the next free code passes this, the width grows.
    max_code: u32,
    /// Bit position where the current width took effect.
    group_origin: u64,
    old_code: u32,
    fin_char: u8,
    summary: DecodeSummary,
}

impl<R: Read> LzwDecoder<R> {
    /// Read the 3-byte header from `source` and prepare to decode.
    pub fn new(mut source: R, options: DecodeOptions) -> crate::error::Result<Self> {
        let header = HeaderParser::read(&mut source)?;
        Ok(Self::with_header(source, header, options))
    }

    /// Decode codes from `source`, which is positioned just after a header
    /// that was already parsed.
    pub fn with_header(source: R, header: Header, options: DecodeOptions) -> Self {
        if options.verbose {
            info!(
                "max bits {}, block mode {}",
                header.max_bits, header.block_mode
            );
        }

        let mut decoder = Self {
            reader: BitReader::new(source),
            table: CodeTable::new(header.max_bits as u32, header.block_mode),
            header,
            options,
            state: DecoderState::AwaitingFirstCode,
            n_bits: INIT_BITS,
            max_code: 0,
            group_origin: 0,
            old_code: 0,
            fin_char: 0,
            summary: DecodeSummary::default(),
        };
        decoder.max_code = decoder.width_ceiling();
        decoder
    }

    /// Largest free code the current width can accommodate.
    ///
    /// At the maximum width the table capacity is the limit, so the width
    /// never grows past it.
    fn width_ceiling(&self) -> u32 {
        if self.n_bits >= self.header.max_bits as u32 {
            self.table.capacity()
        } else {
            (1 << self.n_bits) - 1
        }
    }

    /// Skip the padding that closes the current code group.
    fn close_code_group(&mut self) {
        if self.options.align_code_groups {
            self.reader
                .align_to_group(self.group_origin, self.n_bits as u64 * 8);
        }
        self.group_origin = self.reader.position();
    }

    /// Widen codes by one bit once the next free code passes the ceiling.
    fn grow_code_width(&mut self) {
        if self.table.next_code() > self.max_code && self.n_bits < self.header.max_bits as u32 {
            self.close_code_group();
            self.n_bits += 1;
            self.max_code = self.width_ceiling();
            debug!(
                "code width {} bits at code {}",
                self.n_bits,
                self.table.next_code()
            );
        }
    }

    fn clear(&mut self) {
        self.close_code_group();
        self.table.reset();
        self.n_bits = INIT_BITS;
        self.max_code = self.width_ceiling();
        self.state = DecoderState::Cleared;
        self.summary.clears += 1;
        debug!("CLEAR after {} codes", self.summary.codes_read);
    }

    fn finish(&mut self) {
        self.state = DecoderState::Done;
        if self.reader.has_trailing_bits() {
            self.summary.truncated = true;
            warn!(
                "unexpected end of stream after {} codes, file truncated?",
                self.summary.codes_read
            );
        }
    }

    /// Decode one code, appending its bytes to `out`.
    ///
    /// Returns `Ok(false)` once the stream is exhausted. A CLEAR code
    /// appends nothing but still returns `Ok(true)`. After an error the
    /// decoder is [`Failed`](DecoderState::Failed) and every later call
    /// returns `Ok(false)` without touching `out`.
    pub fn step(&mut self, out: &mut Vec<u8>) -> Result<bool> {
        if matches!(self.state, DecoderState::Done | DecoderState::Failed) {
            return Ok(false);
        }

        let result = self.decode_next(out);
        if result.is_err() {
            self.state = DecoderState::Failed;
        }
        result
    }

    fn decode_next(&mut self, out: &mut Vec<u8>) -> Result<bool> {
        self.grow_code_width();

        let Some(code) = self.reader.read_code(self.n_bits)? else {
            self.finish();
            return Ok(false);
        };
        self.summary.codes_read += 1;
        if self.options.trace_codes {
            trace!("code {} ({} bits)", code, self.n_bits);
        }

        let start = out.len();
        match self.state {
            DecoderState::AwaitingFirstCode => {
                if code >= 256 {
                    return Err(DecompressError::FirstCodeNotLiteral { code });
                }
                out.push(code as u8);
                self.old_code = code;
                self.fin_char = code as u8;
                self.state = DecoderState::SteadyState;
            }
            DecoderState::SteadyState | DecoderState::Cleared => {
                if code == CLEAR_CODE && self.header.block_mode {
                    self.clear();
                    return Ok(true);
                }

                let first = if self.table.contains(code) {
                    self.table.expand_into(code, out)?
                } else if code == self.table.next_code() && self.state == DecoderState::SteadyState
                {
                    // KwKwK: the encoder used the entry it is about to define.
                    let first = self.table.expand_into(self.old_code, out)?;
                    out.push(self.fin_char);
                    first
                } else {
                    return Err(DecompressError::CorruptCode {
                        code,
                        next_code: self.table.next_code(),
                    });
                };

                if self.state == DecoderState::Cleared {
                    self.state = DecoderState::SteadyState;
                } else {
                    self.table.learn(self.old_code, first);
                }
                self.old_code = code;
                self.fin_char = first;
            }
            DecoderState::Done | DecoderState::Failed => return Ok(false),
        }

        let produced = (out.len() - start) as u64;
        if let Some(limit) = self.options.max_output {
            if self.summary.bytes_out + produced > limit {
                // Keep exactly `limit` bytes in total.
                let room = limit - self.summary.bytes_out;
                out.truncate(start + room as usize);
                self.summary.bytes_out = limit;
                return Err(DecompressError::OutputLimit { limit });
            }
        }
        self.summary.bytes_out += produced;
        Ok(true)
    }

    /// Decode the rest of the stream into `sink`.
    ///
    /// On a fatal error everything decoded from earlier codes is written
    /// to `sink` before the error is returned.
    pub fn decode_to<W: Write>(&mut self, mut sink: W) -> crate::error::Result<DecodeSummary> {
        let mut pending = Vec::with_capacity(FLUSH_THRESHOLD * 2);
        loop {
            match self.step(&mut pending) {
                Ok(true) => {
                    if pending.len() >= FLUSH_THRESHOLD {
                        sink.write_all(&pending)?;
                        pending.clear();
                    }
                }
                Ok(false) => break,
                Err(e) => {
                    sink.write_all(&pending)?;
                    sink.flush()?;
                    return Err(e.into());
                }
            }
        }

        sink.write_all(&pending)?;
        sink.flush()?;
        Ok(self.summary)
    }

    /// Decode the rest of the stream into a new vector.
    pub fn decode_to_vec(&mut self) -> crate::error::Result<Vec<u8>> {
        let mut out = Vec::new();
        while self.step(&mut out)? {}
        Ok(out)
    }
}

impl<R> LzwDecoder<R> {
    /// The parsed stream header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Current position in the state machine.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Width of the next code to be read, before any growth check.
    pub fn code_width(&self) -> u32 {
        self.n_bits
    }

    /// The code the table will learn next.
    pub fn next_code(&self) -> u32 {
        self.table.next_code()
    }

    /// Previous code decoded, `None` before the first code.
    pub fn old_code(&self) -> Option<u32> {
        (self.summary.bytes_out > 0).then_some(self.old_code)
    }

    /// Codes read so far, CLEAR codes included.
    pub fn codes_read(&self) -> u64 {
        self.summary.codes_read
    }

    /// First byte of the previous expansion, `None` before the first code.
    pub fn fin_char(&self) -> Option<u8> {
        (self.summary.bytes_out > 0).then_some(self.fin_char)
    }

    /// The dictionary as learned so far.
    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Counters so far. Final once [`state`](Self::state) is `Done` or `Failed`.
    pub fn summary(&self) -> DecodeSummary {
        self.summary
    }
}
