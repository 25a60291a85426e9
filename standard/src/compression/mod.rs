//! Implementations for every compression algorithm that can be named in batch metadata:
//! [DEFLATE](crate::compression::deflate), [lz4](crate::compression::lz4),
//! [zstd](crate::compression::zstd) and [snappy](crate::compression::snappy), plus the
//! [passthrough](crate::compression::passthrough) codec used when compression is disabled.
//!
//! A publisher compresses each flushed batch as one unit, after all of its messages have been
//! serialized. Admission into a batch is decided on uncompressed sizes, so none of these codecs
//! are ever invoked per message on the batching path.
//!
//! # Support for custom implementations
//!
//! Any type implementing [Compress](crate::traits::compression::Compress) and
//! [Decompress](crate::traits::compression::Decompress) can be used in place of the bundled
//! codecs:
//!
//! ```
//! use anyhow::Result;
//! use bytes::Bytes;
//! use tessera_std::traits::compression::{Compress, Decompress};
//!
//! #[derive(Clone)]
//! pub struct Reverse;
//!
//! impl Compress for Reverse {
//!     fn compress(&self, input: Bytes) -> Result<Bytes> {
//!         Ok(input.iter().rev().copied().collect::<Vec<u8>>().into())
//!     }
//! }
//!
//! impl Decompress for Reverse {
//!     fn decompress(&self, input: Bytes) -> Result<Bytes> {
//!         Ok(input.iter().rev().copied().collect::<Vec<u8>>().into())
//!     }
//! }
//!
//! let input = Bytes::from("batch");
//! let compressed = Reverse.compress(input.clone()).unwrap();
//! assert_eq!(compressed, Bytes::from("hctab"));
//! assert_eq!(Reverse.decompress(compressed).unwrap(), input);
//! ```

pub mod deflate;
pub mod lz4;
pub mod passthrough;
pub mod snappy;
pub mod zstd;

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::compression::{Compress, CompressionLevel, Decompress};
    use bytes::Bytes;
    use fake::faker::lorem::en::Paragraph;
    use fake::Fake;

    fn generate_payload() -> Bytes {
        let payload: String = Paragraph(3..8).fake();
        Bytes::from(payload)
    }

    #[test]
    fn zlib_fastest() {
        let payload = generate_payload();

        let compressed = deflate::DeflateComp::zlib()
            .fastest()
            .compress(payload.clone())
            .unwrap();

        let output = deflate::DeflateDecomp::zlib()
            .decompress(compressed)
            .unwrap();

        assert_eq!(payload, output);
    }

    #[test]
    fn zlib_highest_ratio() {
        let payload = generate_payload();

        let compressed = deflate::DeflateComp::zlib()
            .highest_ratio()
            .compress(payload.clone())
            .unwrap();

        let output = deflate::DeflateDecomp::zlib()
            .decompress(compressed)
            .unwrap();

        assert_eq!(payload, output);
    }

    #[test]
    fn gzip_balanced() {
        let payload = generate_payload();

        let compressed = deflate::DeflateComp::gzip()
            .balanced()
            .compress(payload.clone())
            .unwrap();

        let output = deflate::DeflateDecomp::gzip()
            .decompress(compressed)
            .unwrap();

        assert_eq!(payload, output);
    }

    #[test]
    fn zlib_output_is_not_gzip() {
        let payload = generate_payload();
        let compressed = deflate::DeflateComp::zlib().compress(payload).unwrap();

        assert!(deflate::DeflateDecomp::gzip().decompress(compressed).is_err());
    }

    #[test]
    fn zstd_fastest() {
        let payload = generate_payload();

        let compressed = zstd::ZstdComp::new()
            .fastest()
            .compress(payload.clone())
            .unwrap();

        let output = zstd::ZstdDecomp.decompress(compressed).unwrap();

        assert_eq!(payload, output);
    }

    #[test]
    fn zstd_clamps_level() {
        let payload = generate_payload();

        let comp = zstd::ZstdComp::new().level(u32::MAX);
        assert_eq!(comp.get_level(), 19);
        assert_eq!(zstd::ZstdComp::new().level(0).get_level(), 1);

        let compressed = comp.compress(payload.clone()).unwrap();
        let output = zstd::ZstdDecomp.decompress(compressed).unwrap();

        assert_eq!(payload, output);
    }

    #[test]
    fn lz4_round_trip() {
        let payload = generate_payload();

        let compressed = lz4::Lz4Comp.compress(payload.clone()).unwrap();
        let output = lz4::Lz4Decomp.decompress(compressed).unwrap();

        assert_eq!(payload, output);
    }

    #[test]
    fn snappy_round_trip() {
        let payload = generate_payload();

        let compressed = snappy::SnappyComp.compress(payload.clone()).unwrap();
        let output = snappy::SnappyDecomp.decompress(compressed).unwrap();

        assert_eq!(payload, output);
    }

    #[test]
    fn snappy_rejects_garbage() {
        let garbage = Bytes::from_static(&[0x05, 0xff]);
        assert!(snappy::SnappyDecomp.decompress(garbage).is_err());
    }

    #[test]
    fn passthrough_is_identity() {
        let payload = generate_payload();

        let compressed = passthrough::Passthrough.compress(payload.clone()).unwrap();
        assert_eq!(compressed, payload);

        let output = passthrough::Passthrough.decompress(compressed).unwrap();
        assert_eq!(output, payload);
    }

    #[test]
    fn compresses_empty_input() {
        let empty = Bytes::new();

        let lz4 = lz4::Lz4Comp.compress(empty.clone()).unwrap();
        assert_eq!(lz4::Lz4Decomp.decompress(lz4).unwrap(), empty);

        let zstd = zstd::ZstdComp::new().compress(empty.clone()).unwrap();
        assert_eq!(zstd::ZstdDecomp.decompress(zstd).unwrap(), empty);

        let zlib = deflate::DeflateComp::zlib().compress(empty.clone()).unwrap();
        assert_eq!(deflate::DeflateDecomp::zlib().decompress(zlib).unwrap(), empty);
    }
}
