//! Data structures and utilities to enable message batching on publishers.
//!
//! Message batching is an optimization that packs several messages into a single send unit, to
//! reduce network and compression calls for particularly chatty [Publisher](crate::Publisher)s.
//!
//! # Admission
//!
//! A batch container gates which messages may join the in-flight batch. A message is admitted
//! while the sum of admitted payload sizes stays within
//! [MAX_BATCH_SIZE_BYTES](crate::constants::MAX_BATCH_SIZE_BYTES) and the number of admitted
//! messages stays below the configured [BatchConfig] count ceiling. Sizes are measured before
//! compression, as compression only runs once the batch is flushed.
//!
//! # Strategies
//!
//! The [BatchingStrategy] selected in a [BatchConfig] decides which container a
//! [Publisher](crate::Publisher) binds:
//!
//! * [DefaultBatchContainer] flushes every admitted message into one send unit.
//! * [KeyBasedBatchContainer] flushes one send unit per message key.
//! * [ChunkedBatchContainer](crate::chunking::ChunkedBatchContainer) flushes one batch, split
//!   into chunks when its compressed payload exceeds the chunk size.
//!
//! Each container declares whether it implements [SingleBatch] or [MultiBatch] through
//! [BatchContainer::capability], and requesting the other build reports
//! [BatchError::Unsupported](crate::std::errors::BatchError::Unsupported).
//!
//! # Flushing
//!
//! A flush serializes the admitted messages in admission order and compresses the result once
//! with the publisher's compression. The container is empty afterwards.
//!
//! If a batch is incomplete prior to closing a [Publisher](crate::Publisher), calling
//! [finish](crate::Publisher::finish) will flush the pending batch to ensure that it is
//! delivered.

mod batch_config;
mod container;
mod default_container;
mod key_based_container;
mod message;
mod op_send;

pub use batch_config::*;
pub use container::*;
pub use default_container::*;
pub use key_based_container::*;
pub use message::*;
pub use op_send::*;

#[cfg(test)]
pub(crate) use container::test_utils;
