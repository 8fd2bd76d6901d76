//! Compressed files on disk, decoded synchronously or with tokio.

use crate::decompress::{DecodeOptions, DecodeSummary, LzwDecoder};
use crate::error::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A local `.Z` file.
#[derive(Debug, Clone)]
pub struct CompressedFile {
    path: PathBuf,
    name: String,
    length: u64,
}

impl CompressedFile {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            length: metadata.len(),
        })
    }

    /// Compressed size in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the decompressed file: `.Z` stripped, `.taZ` turned into `.tar`.
    ///
    /// `None` when the name carries neither suffix.
    pub fn output_name(&self) -> Option<String> {
        if let Some(stem) = self.name.strip_suffix(".Z") {
            (!stem.is_empty()).then(|| stem.to_string())
        } else {
            self.name
                .strip_suffix(".taZ")
                .map(|stem| format!("{}.tar", stem))
        }
    }

    /// Sync decode into `sink`.
    pub fn decompress_to<W: std::io::Write>(
        &self,
        sink: W,
        options: DecodeOptions,
    ) -> Result<DecodeSummary> {
        let file = BufReader::new(File::open(&self.path)?);
        LzwDecoder::new(file, options)?.decode_to(sink)
    }

    /// Sync decode into memory.
    pub fn read_decompressed_sync(&self, options: DecodeOptions) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decompress_to(&mut out, options)?;
        Ok(out)
    }

    /// Async decode into memory.
    ///
    /// The file is read with tokio; decoding runs on the calling task.
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn read_decompressed(&self, options: DecodeOptions) -> Result<Vec<u8>> {
        let file = tokio::fs::File::open(&self.path).await?;
        decompress_async(file, options).await
    }
}

/// Read all of `source`, then decode it.
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub async fn decompress_async<R>(mut source: R, options: DecodeOptions) -> Result<Vec<u8>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    use tokio::io::AsyncReadExt;

    let mut data = Vec::new();
    source.read_to_end(&mut data).await?;
    crate::decompress_with(&data, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("__fixtures__/compressed")
            .join(name)
    }

    #[test]
    fn test_output_name() {
        let file = CompressedFile::new(fixture("lorem_b16.Z")).unwrap();
        assert_eq!(file.name(), "lorem_b16.Z");
        assert_eq!(file.output_name().as_deref(), Some("lorem_b16"));

        let file = CompressedFile::new(fixture("lorem.txt.expected")).unwrap();
        assert_eq!(file.output_name(), None);
    }

    #[test]
    fn test_read_decompressed_sync() {
        let file = CompressedFile::new(fixture("lorem_b16.Z")).unwrap();
        assert_eq!(file.length(), 2074);

        let data = file.read_decompressed_sync(DecodeOptions::default()).unwrap();
        let expected = include_bytes!("../__fixtures__/compressed/lorem.txt.expected");
        assert_eq!(data.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_missing_file() {
        assert!(CompressedFile::new(fixture("missing.Z")).is_err());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_read_decompressed_async() {
        let file = CompressedFile::new(fixture("lorem_b16_forced_clear.Z")).unwrap();
        let data = file.read_decompressed(DecodeOptions::default()).await.unwrap();
        let expected = include_bytes!("../__fixtures__/compressed/lorem.txt.expected");
        assert_eq!(data.as_slice(), expected.as_slice());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_decompress_async_reader() {
        let data: &[u8] = &[0x1f, 0x9d, 0x90, 0x61, 0x02, 0x0a, 0x0c, 0x03];
        let out = decompress_async(data, DecodeOptions::default()).await.unwrap();
        assert_eq!(out, b"aaaaaaa");
    }
}
