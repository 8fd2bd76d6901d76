//! Decode many independent `.Z` streams on the rayon pool.
//!
//! Every stream gets its own decoder; there is no parallelism inside a
//! stream, since each code depends on the entry learned from the one before.

use crate::decompress::DecodeOptions;
use crate::error::Result;
use rayon::prelude::*;

/// Decompress each input, in parallel. Results keep the input order.
pub fn decompress_all<T>(inputs: &[T], options: DecodeOptions) -> Vec<Result<Vec<u8>>>
where
    T: AsRef<[u8]> + Sync,
{
    inputs
        .par_iter()
        .map(|input| crate::decompress_with(input.as_ref(), options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LzwError;

    #[test]
    fn test_decompress_all_keeps_order() {
        let lorem: &[u8] = include_bytes!("../__fixtures__/compressed/lorem_b16.Z");
        let sevens: &[u8] = &[0x1f, 0x9d, 0x90, 0x61, 0x02, 0x0a, 0x0c, 0x03];
        let bogus: &[u8] = b"not compressed";

        let results = decompress_all(&[lorem, sevens, bogus], DecodeOptions::default());
        assert_eq!(results.len(), 3);

        let expected = include_bytes!("../__fixtures__/compressed/lorem.txt.expected");
        assert_eq!(results[0].as_ref().unwrap().as_slice(), expected.as_slice());
        assert_eq!(results[1].as_ref().unwrap(), b"aaaaaaa");
        assert!(matches!(
            results[2],
            Err(LzwError::InvalidSignature { .. })
        ));
    }
}
