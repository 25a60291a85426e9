//! An identity codec, bound to publishers configured without compression.

use crate::traits::compression::{Compress, Decompress};
use anyhow::Result;
use bytes::Bytes;

#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Compress for Passthrough {
    fn compress(&self, input: Bytes) -> Result<Bytes> {
        Ok(input)
    }
}

impl Decompress for Passthrough {
    fn decompress(&self, input: Bytes) -> Result<Bytes> {
        Ok(input)
    }
}
