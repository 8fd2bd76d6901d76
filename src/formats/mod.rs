//! Magic-number detection for the `1F xx` family of Unix compressors.
//!
//! Only [`Signature::Compress`] is decoded by this crate. The others are
//! recognized so a caller can be told what it handed in instead.

/// Leading two bytes of a compressed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// `compress` LZW (`.Z`)
    Compress,
    /// gzip / deflate (`.gz`)
    Gzip,
    /// Huffman `pack` (`.z`)
    Pack,
    /// SCO `compress -H` LZH
    Lzh,
}

impl Signature {
    pub const COMPRESS: &'static [u8; 2] = b"\x1f\x9d";
    pub const GZIP: &'static [u8; 2] = b"\x1f\x8b";
    pub const PACK: &'static [u8; 2] = b"\x1f\x1e";
    pub const LZH: &'static [u8; 2] = b"\x1f\xa0";

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(Self::COMPRESS) {
            Some(Self::Compress)
        } else if data.starts_with(Self::GZIP) {
            Some(Self::Gzip)
        } else if data.starts_with(Self::PACK) {
            Some(Self::Pack)
        } else if data.starts_with(Self::LZH) {
            Some(Self::Lzh)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Compress => "compress (LZW)",
            Self::Gzip => "gzip",
            Self::Pack => "pack",
            Self::Lzh => "compress -H (LZH)",
        }
    }
}
