//! Support for snappy, a [fast compression algorithm developed by
//! Google](https://github.com/google/snappy).
//!
//! Adapts the [snap] crate. Batches are compressed with the raw (unframed) snappy format, so
//! the decompressor reads the uncompressed length from the snappy preamble.

use crate::traits::compression::{Compress, Decompress};
use anyhow::Result;
use bytes::Bytes;
use snap::raw::{Decoder, Encoder};

#[derive(Debug, Default, Clone)]
pub struct SnappyComp;

impl Compress for SnappyComp {
    fn compress(&self, input: Bytes) -> Result<Bytes> {
        let output = Encoder::new().compress_vec(&input)?;
        Ok(output.into())
    }
}

#[derive(Debug, Default, Clone)]
pub struct SnappyDecomp;

impl Decompress for SnappyDecomp {
    fn decompress(&self, input: Bytes) -> Result<Bytes> {
        let output = Decoder::new().decompress_vec(&input)?;
        Ok(output.into())
    }
}
