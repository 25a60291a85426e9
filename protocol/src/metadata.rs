use crate::WireCompression;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Properties = BTreeMap<String, String>;

/// Header attached to every send unit produced by a publisher.
///
/// For batches, `num_messages_in_batch` is the number of entries encoded in the payload and
/// `uncompressed_size` is the payload length before `compression` was applied. `properties`
/// and `event_time` are only set on unbatched units; batch entries carry their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageMetadata {
    pub producer_name: String,
    pub topic: String,
    pub sequence_id: u64,
    pub highest_sequence_id: u64,
    pub publish_time: u64,
    pub compression: WireCompression,
    pub uncompressed_size: u32,
    pub num_messages_in_batch: u32,
    pub partition_key: Option<String>,
    pub properties: Properties,
    pub event_time: Option<u64>,
}

impl MessageMetadata {
    pub fn new(producer_name: &str, topic: &str, compression: WireCompression) -> Self {
        Self {
            producer_name: producer_name.to_owned(),
            topic: topic.to_owned(),
            sequence_id: 0,
            highest_sequence_id: 0,
            publish_time: chrono::Utc::now().timestamp_millis() as u64,
            compression,
            uncompressed_size: 0,
            num_messages_in_batch: 1,
            partition_key: None,
            properties: Properties::new(),
            event_time: None,
        }
    }
}

/// Per-message header written in front of every entry of a batch payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SingleMessageMetadata {
    pub payload_size: u32,
    pub sequence_id: u64,
    pub partition_key: Option<String>,
    pub properties: Properties,
    pub event_time: Option<u64>,
}
