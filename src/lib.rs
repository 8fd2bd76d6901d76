//! Streaming decoder for Unix `compress` (`.Z`) files.
//!
//! Decodes the adaptive-dictionary LZW format written by `compress` (and
//! `ncompress`): a 3-byte header followed by 9 to 16 bit codes packed LSB
//! first, with the code width growing as the table fills and, in block
//! mode, CLEAR codes that reset the table.
//!
//! Compression is not supported.
//!
//! ## Features
//! - Core library depends only on `log`
//! - `async` - Async decoding with tokio
//! - `parallel` - Decode many streams at once with rayon
//! - `wasm` - Browser WASM bindings
//!
//! ## Example
//!
//! ```rust
//! // "aaaaaaa" compressed with 16-bit block mode
//! let data = [0x1f, 0x9d, 0x90, 0x61, 0x02, 0x0a, 0x0c, 0x03];
//! assert_eq!(lzw_stream::decompress(&data).unwrap(), b"aaaaaaa");
//! ```

#[cfg(feature = "parallel")]
mod batch;
pub mod decompress;
pub mod error;
mod file_media;
pub mod formats;
pub mod parsing;

#[cfg(feature = "wasm")]
mod wasm_bindings;

pub use decompress::{DecodeOptions, DecodeSummary, DecompressError, LzwDecoder};
pub use error::LzwError;
pub use file_media::CompressedFile;
pub use parsing::Header;

#[cfg(feature = "async")]
pub use file_media::decompress_async;

#[cfg(feature = "parallel")]
pub use batch::decompress_all;

#[cfg(feature = "wasm")]
pub use wasm_bindings::*;

use std::io::{Read, Write};

/// Decompress a complete `.Z` stream held in memory.
///
/// A truncated final code is logged and otherwise ignored.
pub fn decompress(data: &[u8]) -> error::Result<Vec<u8>> {
    decompress_with(data, DecodeOptions::default())
}

/// Like [`decompress`], with explicit options.
pub fn decompress_with(data: &[u8], options: DecodeOptions) -> error::Result<Vec<u8>> {
    let header = parsing::HeaderParser::parse(data)?;
    let source = &data[parsing::HeaderParser::HEADER_SIZE..];
    LzwDecoder::with_header(source, header, options).decode_to_vec()
}

/// Decompress everything `source` yields into `sink`.
///
/// Fatal errors are returned after all bytes decoded so far have been
/// written to `sink`.
pub fn decompress_to<R: Read, W: Write>(
    source: R,
    sink: W,
    options: DecodeOptions,
) -> error::Result<DecodeSummary> {
    LzwDecoder::new(source, options)?.decode_to(sink)
}

/// Check if `data` starts with the `.Z` magic bytes.
pub fn is_compressed(data: &[u8]) -> bool {
    formats::Signature::from_bytes(data) == Some(formats::Signature::Compress)
}
