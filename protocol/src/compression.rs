use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tessera_std::compression::{deflate, lz4, passthrough, snappy, zstd};
use tessera_std::errors::ProtocolError;
use tessera_std::traits::compression::{Compress, Decompress};

pub type Comp = Arc<dyn Compress + Send + Sync>;
pub type Decomp = Arc<dyn Decompress + Send + Sync>;

const NONE: u8 = 0x0;
const LZ4: u8 = 0x1;
const ZLIB: u8 = 0x2;
const ZSTD: u8 = 0x3;
const SNAPPY: u8 = 0x4;

/// The compression codec applied to a batch payload, as recorded in its metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WireCompression {
    #[default]
    None,
    Lz4,
    Zlib,
    Zstd,
    Snappy,
}

impl WireCompression {
    /// Resolves the compressor used to encode payloads of this type.
    pub fn compressor(&self) -> Comp {
        match self {
            Self::None => Arc::new(passthrough::Passthrough),
            Self::Lz4 => Arc::new(lz4::Lz4Comp),
            Self::Zlib => Arc::new(deflate::DeflateComp::zlib()),
            Self::Zstd => Arc::new(zstd::ZstdComp::new()),
            Self::Snappy => Arc::new(snappy::SnappyComp),
        }
    }

    /// Resolves the decompressor able to decode payloads of this type.
    pub fn decompressor(&self) -> Decomp {
        match self {
            Self::None => Arc::new(passthrough::Passthrough),
            Self::Lz4 => Arc::new(lz4::Lz4Decomp),
            Self::Zlib => Arc::new(deflate::DeflateDecomp::zlib()),
            Self::Zstd => Arc::new(zstd::ZstdDecomp),
            Self::Snappy => Arc::new(snappy::SnappyDecomp),
        }
    }

    pub fn is_compressed(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<WireCompression> for u8 {
    fn from(value: WireCompression) -> Self {
        match value {
            WireCompression::None => NONE,
            WireCompression::Lz4 => LZ4,
            WireCompression::Zlib => ZLIB,
            WireCompression::Zstd => ZSTD,
            WireCompression::Snappy => SNAPPY,
        }
    }
}

impl TryFrom<u8> for WireCompression {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let compression = match value {
            NONE => Self::None,
            LZ4 => Self::Lz4,
            ZLIB => Self::Zlib,
            ZSTD => Self::Zstd,
            SNAPPY => Self::Snappy,
            unknown => return Err(ProtocolError::UnknownCompression(unknown)),
        };

        Ok(compression)
    }
}

impl Display for WireCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Lz4 => "lz4",
            Self::Zlib => "zlib",
            Self::Zstd => "zstd",
            Self::Snappy => "snappy",
        };

        write!(f, "{name}")
    }
}
