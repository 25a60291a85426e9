use super::types::DeflateLibrary;
use crate::traits::compression::Decompress;
use anyhow::Result;
use bytes::Bytes;
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

/// Decompression half of the DEFLATE implementation.
#[derive(Debug, Clone, Default)]
pub struct DeflateDecomp {
    library: DeflateLibrary,
}

impl DeflateDecomp {
    /// Constructs a new `DeflateDecomp` instance, using the provided [DeflateLibrary] variant. It
    /// is recommended to use either the `gzip` or `zlib` associated functions instead.
    pub fn new(library: DeflateLibrary) -> Self {
        Self { library }
    }

    /// Constructs a new `DeflateDecomp` instance, using [gzip](https://gzip.org) as the
    /// container format.
    pub fn gzip() -> Self {
        Self::new(DeflateLibrary::Gzip)
    }

    /// Constructs a new `DeflateDecomp` instance, using [zlib](https://github.com/madler/zlib)
    /// as the container format.
    pub fn zlib() -> Self {
        Self::new(DeflateLibrary::Zlib)
    }
}

impl Decompress for DeflateDecomp {
    fn decompress(&self, input: Bytes) -> Result<Bytes> {
        let mut output = Vec::new();

        match self.library {
            DeflateLibrary::Gzip => {
                let mut decoder = GzDecoder::new(&input[..]);
                decoder.read_to_end(&mut output)?;
            }
            DeflateLibrary::Zlib => {
                let mut decoder = ZlibDecoder::new(&input[..]);
                decoder.read_to_end(&mut output)?;
            }
        };

        Ok(output.into())
    }
}
