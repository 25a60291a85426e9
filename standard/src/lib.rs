//! A library containing the shared building blocks of the Tessera crates: the error types,
//! the compression interfaces and the codecs understood by the batch wire format.
//!
//! The publisher client compresses every batch as a single unit before it is written to the
//! wire, so the codecs offered here map one-to-one onto the compression types that can appear
//! in batch metadata: [lz4](crate::compression::lz4), [zlib](crate::compression::deflate),
//! [zstd](crate::compression::zstd) and [snappy](crate::compression::snappy).
//!
//! # Feature flags
//!
//! - `compression`: Enables all compression implementations. Enabled by default.
//!
//! The [errors] and [traits] modules are always available, so a custom codec can be adapted
//! to Tessera by implementing the [Compress](crate::traits::compression::Compress) and
//! [Decompress](crate::traits::compression::Decompress) traits without pulling in any of the
//! bundled compression libraries.

#[cfg(feature = "compression")]
pub mod compression;

pub mod errors;
pub mod traits;
