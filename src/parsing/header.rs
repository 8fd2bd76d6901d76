//! `.Z` stream header.
//!
//! Three bytes: the magic `0x1F 0x9D`, then a control byte holding
//! `max_bits` in bits 0-4 and the block-mode flag in bit 7.

use crate::error::{LzwError, Result};
use crate::formats::Signature;
use std::io::{ErrorKind, Read};

/// Control byte bits holding `max_bits`.
pub const BIT_MASK: u8 = 0x1f;

/// Control byte bit enabling CLEAR codes.
pub const BLOCK_MODE: u8 = 0x80;

/// Narrowest `max_bits` a stream may declare.
pub const MIN_MAX_BITS: u8 = 9;

/// Widest `max_bits` this crate decodes.
pub const MAX_MAX_BITS: u8 = 16;

/// Decoding parameters fixed by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Widest code in the stream, 9..=16.
    pub max_bits: u8,
    /// Code 256 is CLEAR.
    pub block_mode: bool,
}

impl Header {
    pub fn new(max_bits: u8, block_mode: bool) -> Result<Self> {
        if !(MIN_MAX_BITS..=MAX_MAX_BITS).contains(&max_bits) {
            return Err(LzwError::UnsupportedMaxBits(max_bits));
        }
        Ok(Self {
            max_bits,
            block_mode,
        })
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        let mut control = self.max_bits & BIT_MASK;
        if self.block_mode {
            control |= BLOCK_MODE;
        }
        [Signature::COMPRESS[0], Signature::COMPRESS[1], control]
    }
}

pub struct HeaderParser;

impl HeaderParser {
    pub const HEADER_SIZE: usize = 3;

    /// Parse a header from the start of `buffer`.
    pub fn parse(buffer: &[u8]) -> Result<Header> {
        if buffer.len() < Self::HEADER_SIZE {
            return Err(LzwError::HeaderTooShort { have: buffer.len() });
        }

        if !buffer.starts_with(Signature::COMPRESS) {
            return Err(LzwError::InvalidSignature {
                found: [buffer[0], buffer[1]],
                format: Signature::from_bytes(buffer),
            });
        }

        Header::new(buffer[2] & BIT_MASK, buffer[2] & BLOCK_MODE != 0)
    }

    /// Read exactly the header from `source`, leaving it at the first code byte.
    pub fn read<R: Read>(source: &mut R) -> Result<Header> {
        let mut buffer = [0u8; Self::HEADER_SIZE];
        let mut have = 0;
        while have < buffer.len() {
            match source.read(&mut buffer[have..]) {
                Ok(0) => break,
                Ok(n) => have += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Self::parse(&buffer[..have])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block_mode_16() {
        let header = HeaderParser::parse(&[0x1f, 0x9d, 0x90]).unwrap();
        assert_eq!(header.max_bits, 16);
        assert!(header.block_mode);
        assert_eq!(header.to_bytes(), [0x1f, 0x9d, 0x90]);
    }

    #[test]
    fn test_parse_without_block_mode() {
        let header = HeaderParser::parse(&[0x1f, 0x9d, 0x0c, 0xff]).unwrap();
        assert_eq!(header.max_bits, 12);
        assert!(!header.block_mode);
    }

    #[test]
    fn test_invalid_signature() {
        assert!(matches!(
            HeaderParser::parse(b"abc"),
            Err(LzwError::InvalidSignature {
                found: [b'a', b'b'],
                format: None
            })
        ));
        assert!(matches!(
            HeaderParser::parse(&[0x1f, 0x8b, 0x08]),
            Err(LzwError::InvalidSignature {
                format: Some(Signature::Gzip),
                ..
            })
        ));
    }

    #[test]
    fn test_header_too_short() {
        assert!(matches!(
            HeaderParser::parse(&[0x1f, 0x9d]),
            Err(LzwError::HeaderTooShort { have: 2 })
        ));
        assert!(matches!(
            HeaderParser::read(&mut &[0x1f][..]),
            Err(LzwError::HeaderTooShort { have: 1 })
        ));
    }

    #[test]
    fn test_unsupported_max_bits() {
        assert!(matches!(
            HeaderParser::parse(&[0x1f, 0x9d, 0x91]),
            Err(LzwError::UnsupportedMaxBits(17))
        ));
        assert!(matches!(
            HeaderParser::parse(&[0x1f, 0x9d, 0x08]),
            Err(LzwError::UnsupportedMaxBits(8))
        ));
    }

    #[test]
    fn test_read_leaves_source_at_codes() {
        let data = [0x1f, 0x9d, 0x8c, 0x41, 0x00];
        let mut source = &data[..];
        let header = HeaderParser::read(&mut source).unwrap();
        assert_eq!(header, Header::new(12, true).unwrap());
        assert_eq!(source, &[0x41, 0x00]);
    }
}
