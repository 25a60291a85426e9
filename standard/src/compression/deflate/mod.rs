//! Support for DEFLATE, a [lossless data compression algorithm](https://datatracker.ietf.org/doc/html/rfc1951).
//!
//! Adapts the [flate2] crate, the most widely used implementation of the DEFLATE compression algorithm
//! built in Rust for use with `Tessera`.
//!
//! Batches tagged with the `zlib` wire compression type use the [zlib](https://github.com/madler/zlib)
//! container. The [gzip](https://gzip.org) container is offered for payloads compressed outside of
//! a batch.

mod comp;
mod decomp;
mod types;

pub use comp::*;
pub use decomp::*;
pub use types::*;
