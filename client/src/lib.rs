//! Publisher-side batching for Tessera.
//!
//! A [Publisher] assigns sequence ids to the messages it is handed and, when batching is
//! enabled, collects them in a batch container until the batch has to be flushed. Flushed
//! batches are compressed once and written to any [Sink](futures::Sink) of
//! [Frame](tessera_protocol::Frame)s.
//!
//! ```
//! use tessera::batching::BatchConfig;
//! use tessera::prelude::*;
//! use tessera_protocol::Frame;
//!
//! # futures::executor::block_on(async {
//! let config = PublisherConfig::new("persistent://public/default/readings", "producer-1")
//!     .compression(CompressionType::Zstd)
//!     .with_batching(BatchConfig::balanced());
//!
//! let mut publisher = Publisher::new(config, Vec::<Frame>::new());
//!
//! publisher.send("first").await?;
//! publisher.send("second").await?;
//!
//! let frames = publisher.finish().await?;
//! assert_eq!(frames.len(), 1);
//! # Ok::<(), tessera::std::errors::TesseraError>(())
//! # }).unwrap();
//! ```

mod publisher;

pub mod batching;
pub mod chunking;
pub mod config;
pub mod constants;
pub mod prelude;
pub mod state;
pub(crate) mod utils;

pub use publisher::*;

pub mod std {
    pub use tessera_std::*;
}
