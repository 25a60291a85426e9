//! Support for [lz4](https://github.com/lz4/lz4), favouring throughput over ratio.
//!
//! Batches are written as lz4 frames through [lz4_flex], so a compressed batch carries its own
//! block checksums and end marker, and can be decoded without knowing its uncompressed size.

use crate::traits::compression::{Compress, Decompress};
use anyhow::Result;
use bytes::Bytes;
use lz4_flex::frame::{FrameDecoder, FrameEncoder};
use std::io::{Read, Write};

#[derive(Debug, Default, Clone)]
pub struct Lz4Comp;

impl Compress for Lz4Comp {
    fn compress(&self, input: Bytes) -> Result<Bytes> {
        let mut encoder = FrameEncoder::new(Vec::with_capacity(input.len()));
        encoder.write_all(&input)?;

        Ok(encoder.finish()?.into())
    }
}

#[derive(Debug, Default, Clone)]
pub struct Lz4Decomp;

impl Decompress for Lz4Decomp {
    fn decompress(&self, input: Bytes) -> Result<Bytes> {
        let mut output = Vec::with_capacity(input.len() * 2);
        FrameDecoder::new(input.as_ref()).read_to_end(&mut output)?;

        Ok(output.into())
    }
}
