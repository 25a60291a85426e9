//! Splitting of large batches into chunks, and their reassembly.
//!
//! A [ChunkedBatchContainer] builds a batch like any other container, but splits its compressed
//! payload into pieces of at most [ChunkConfig::chunk_size] bytes. Every piece is tagged with
//! [ChunkHeaders](tessera_protocol::ChunkHeaders) naming the sequence it belongs to, and a
//! [ChunkStore] joins the pieces of a sequence back together once they have all arrived.

mod chunk_config;
mod chunk_store;
mod chunked_container;

pub use chunk_config::*;
pub use chunk_store::*;
pub use chunked_container::*;
