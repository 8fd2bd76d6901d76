//! Error types for `.Z` decoding.
//!
//! This module provides the [`LzwError`] type which covers every fatal
//! condition met while reading a header or decoding a stream.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Format | [`InvalidSignature`], [`HeaderTooShort`], [`UnsupportedMaxBits`] | Not a decodable `.Z` stream |
//! | Decoding | [`Decompress`] | Corrupt code stream, or output over the configured limit |
//! | I/O | [`Io`] | The byte source or sink failed |
//!
//! A stream that simply stops inside its last code is **not** an error:
//! decoding succeeds and [`DecodeSummary::truncated`] is set.
//!
//! ## Example
//!
//! ```rust
//! use lzw_stream::LzwError;
//!
//! match lzw_stream::decompress(b"\x1f\x8b\x08\x00") {
//!     Err(LzwError::InvalidSignature { format: Some(f), .. }) => {
//!         eprintln!("this is {}, not compress", f.name())
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//!     Ok(data) => println!("{} bytes", data.len()),
//! }
//! ```
//!
//! [`InvalidSignature`]: LzwError::InvalidSignature
//! [`HeaderTooShort`]: LzwError::HeaderTooShort
//! [`UnsupportedMaxBits`]: LzwError::UnsupportedMaxBits
//! [`Decompress`]: LzwError::Decompress
//! [`Io`]: LzwError::Io
//! [`DecodeSummary::truncated`]: crate::DecodeSummary::truncated

use crate::decompress::DecompressError;
use crate::formats::Signature;
use std::fmt;
use std::io;

/// Error type for `.Z` operations.
#[derive(Debug)]
pub enum LzwError {
    /// The stream does not start with `0x1F 0x9D`.
    ///
    /// `format` names the compressor when the bytes belong to a related
    /// Unix format (gzip, pack, ...).
    InvalidSignature {
        found: [u8; 2],
        format: Option<Signature>,
    },

    /// Fewer than 3 header bytes were available.
    HeaderTooShort {
        /// Number of bytes read before the source ran dry.
        have: usize,
    },

    /// The header asks for a code width outside 9..=16.
    UnsupportedMaxBits(u8),

    /// Decoding stopped on a corrupt code or the output limit.
    ///
    /// Output produced before the failing code is valid.
    Decompress(DecompressError),

    /// An I/O error occurred.
    Io(io::Error),
}

impl fmt::Display for LzwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSignature {
                format: Some(format),
                ..
            } => write!(f, "Not in compressed format (found {} data)", format.name()),
            Self::InvalidSignature { found, format: None } => write!(
                f,
                "Not in compressed format (magic {:02x} {:02x})",
                found[0], found[1]
            ),
            Self::HeaderTooShort { have } => {
                write!(f, "Header too short: need 3 bytes, have {}", have)
            }
            Self::UnsupportedMaxBits(bits) => {
                write!(f, "Compressed with {} bits, only 9 to 16 are supported", bits)
            }
            Self::Decompress(e) => write!(f, "{}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for LzwError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decompress(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LzwError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DecompressError> for LzwError {
    fn from(e: DecompressError) -> Self {
        match e {
            DecompressError::Io(e) => Self::Io(e),
            e => Self::Decompress(e),
        }
    }
}

impl LzwError {
    /// Whether the error was raised before any output could exist.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSignature { .. } | Self::HeaderTooShort { .. } | Self::UnsupportedMaxBits(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LzwError>;
