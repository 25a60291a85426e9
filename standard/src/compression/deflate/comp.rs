use super::types::DeflateLibrary;
use crate::traits::compression::{Compress, CompressionLevel};
use anyhow::Result;
use bytes::Bytes;
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::Write;

/// Compression half of the DEFLATE implementation.
///
/// `DeflateComp` implements [Compress], and defaults to the `zlib` container at the
/// library's default compression level.
#[derive(Debug, Clone, Default)]
pub struct DeflateComp {
    library: DeflateLibrary,
    level: Compression,
}

impl DeflateComp {
    pub fn new(library: DeflateLibrary) -> Self {
        Self {
            library,
            level: Compression::default(),
        }
    }

    pub fn gzip() -> Self {
        Self::new(DeflateLibrary::Gzip)
    }

    pub fn zlib() -> Self {
        Self::new(DeflateLibrary::Zlib)
    }
}

impl CompressionLevel for DeflateComp {
    fn highest_ratio(mut self) -> Self {
        self.level = Compression::best();
        self
    }

    fn balanced(mut self) -> Self {
        self.level = Compression::default();
        self
    }

    fn fastest(mut self) -> Self {
        self.level = Compression::fast();
        self
    }

    fn level(mut self, level: u32) -> Self {
        self.level = Compression::new(level.min(Compression::best().level()));
        self
    }
}

impl Compress for DeflateComp {
    fn compress(&self, input: Bytes) -> Result<Bytes> {
        let buf = Vec::with_capacity(input.len());

        let output = match self.library {
            DeflateLibrary::Gzip => {
                let mut encoder = GzEncoder::new(buf, self.level);
                encoder.write_all(&input)?;
                encoder.finish()?
            }
            DeflateLibrary::Zlib => {
                let mut encoder = ZlibEncoder::new(buf, self.level);
                encoder.write_all(&input)?;
                encoder.finish()?
            }
        };

        Ok(output.into())
    }
}
