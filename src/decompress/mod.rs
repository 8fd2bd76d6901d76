//! LZW decompression for the Unix `compress` (`.Z`) format.
//!
//! ## Components
//!
//! | Type | Role |
//! |------|------|
//! | [`BitReader`] | Pulls fixed-width codes, LSB first, from any [`std::io::Read`] |
//! | [`CodeTable`] | Prefix/suffix dictionary learned while decoding |
//! | [`LzwDecoder`] | State machine tying the two together |
//!
//! ## Architecture
//!
//! ```text
//! Compressed Data (after the 3-byte header)
//!       ↓
//! ┌─────────────┐
//! │ BitReader   │ ← 9..=16 bit codes, refilled from the source
//! └─────────────┘
//!       ↓
//! ┌─────────────┐
//! │ LzwDecoder  │ ← width growth, CLEAR, KwKwK substitution
//! └─────────────┘
//!       ↕
//! ┌─────────────┐
//! │ CodeTable   │ ← prefix chains expanded into byte runs
//! └─────────────┘
//!       ↓
//! Decompressed Data
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lzw_stream::decompress::{DecodeOptions, LzwDecoder};
//!
//! // "aaaaaaa" compressed with 16-bit block mode
//! let data: &[u8] = &[0x1f, 0x9d, 0x90, 0x61, 0x02, 0x0a, 0x0c, 0x03];
//! let mut decoder = LzwDecoder::new(data, DecodeOptions::default()).unwrap();
//! let mut out = Vec::new();
//! let summary = decoder.decode_to(&mut out).unwrap();
//! assert_eq!(out, b"aaaaaaa");
//! assert!(!summary.truncated);
//! ```

mod bit_reader;
mod code_table;
mod lzw;


pub use bit_reader::BitReader;
pub use code_table::CodeTable;
pub use lzw::{DecoderState, LzwDecoder};

use std::fmt;
use std::io;

/// Code width every stream (and every CLEAR) starts with.
pub const INIT_BITS: u32 = 9;

/// Widest code this decoder accepts.
pub const MAX_BITS: u32 = 16;

/// Reserved code that resets the table in block mode.
pub const CLEAR_CODE: u32 = 256;

/// Decompression errors.
#[derive(Debug)]
pub enum DecompressError {
    /// The first code of a stream was not a literal.
    FirstCodeNotLiteral { code: u32 },
    /// A code beyond the next learnable code.
    CorruptCode { code: u32, next_code: u32 },
    /// A prefix chain that does not end at a literal.
    CorruptChain { code: u32 },
    /// Output grew past [`DecodeOptions::max_output`].
    OutputLimit { limit: u64 },
    Io(io::Error),
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstCodeNotLiteral { code } => {
                write!(f, "Corrupt input: first code {} is not a literal", code)
            }
            Self::CorruptCode { code, next_code } => {
                write!(
                    f,
                    "Corrupt input: code {} exceeds next code {}",
                    code, next_code
                )
            }
            Self::CorruptChain { code } => {
                write!(f, "Corrupt input: prefix chain of code {} is broken", code)
            }
            Self::OutputLimit { limit } => {
                write!(f, "Decompressed output exceeds limit of {} bytes", limit)
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for DecompressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DecompressError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, DecompressError>;

/// Decoder configuration, passed in at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Log the header fields at `info` level.
    pub verbose: bool,
    /// Log every decoded code at `trace` level.
    pub trace_codes: bool,
    /// Skip the padding `compress` writes after each `n_bits`-byte code
    /// group when the width grows or a CLEAR is emitted.
    pub align_code_groups: bool,
    /// Fail once more than this many bytes have been produced.
    pub max_output: Option<u64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            trace_codes: false,
            align_code_groups: true,
            max_output: None,
        }
    }
}

/// What a completed decode saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Bytes written to the sink.
    pub bytes_out: u64,
    /// Codes read from the stream, CLEAR codes included.
    pub codes_read: u64,
    /// Number of CLEAR codes seen.
    pub clears: u32,
    /// The stream ended inside a code. Output up to that point is intact.
    pub truncated: bool,
}
