//! Support for [zstd](https://github.com/facebook/zstd), through the [zstd] crate.
//!
//! [ZstdComp] starts at the library's default level. Levels above 19 need much more memory
//! while compressing, so [CompressionLevel::level] clamps to 19 and the long-range
//! levels are never selected.

use crate::traits::compression::{Compress, CompressionLevel, Decompress};
use anyhow::Result;
use bytes::Bytes;

const MAX_LEVEL: i32 = 19;
const MIN_LEVEL: i32 = 1;

#[derive(Debug, Clone)]
pub struct ZstdComp {
    level: i32,
}

impl ZstdComp {
    pub fn new() -> Self {
        Self {
            level: zstd::DEFAULT_COMPRESSION_LEVEL,
        }
    }

    pub fn get_level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdComp {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionLevel for ZstdComp {
    fn highest_ratio(self) -> Self {
        Self { level: MAX_LEVEL }
    }

    fn balanced(self) -> Self {
        Self::new()
    }

    fn fastest(self) -> Self {
        Self { level: MIN_LEVEL }
    }

    fn level(self, level: u32) -> Self {
        let level = level.clamp(MIN_LEVEL as u32, MAX_LEVEL as u32) as i32;
        Self { level }
    }
}

impl Compress for ZstdComp {
    fn compress(&self, input: Bytes) -> Result<Bytes> {
        Ok(zstd::bulk::compress(&input, self.level)?.into())
    }
}

#[derive(Debug, Default, Clone)]
pub struct ZstdDecomp;

impl Decompress for ZstdDecomp {
    fn decompress(&self, input: Bytes) -> Result<Bytes> {
        Ok(zstd::stream::decode_all(input.as_ref())?.into())
    }
}
