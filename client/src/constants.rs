//! Commonly used constants.

use crate::utils::units;
use std::time::Duration;

/// Hard ceiling on the summed payload bytes admitted into one batch.
pub const MAX_BATCH_SIZE_BYTES: u64 = units::kilobyte(128);
/// Starting capacity of the serialization buffer for a publisher's first batch.
pub const INITIAL_BATCH_BUFFER_SIZE: usize = 1024;
/// The default `max_messages` setting for a batch.
pub const BATCHING_MAX_MESSAGES_DEFAULT: u32 = 1000;
/// The default time a non-empty batch may wait before it is flushed.
pub const BATCHING_MAX_PUBLISH_DELAY_DEFAULT: Duration = Duration::from_millis(1);
