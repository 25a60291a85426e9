use bytes::Bytes;
use tessera_protocol::{Properties, SingleMessageMetadata};

/// A message handed to a publisher, before it has been assigned a sequence id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub(crate) payload: Bytes,
    pub(crate) key: Option<String>,
    pub(crate) properties: Properties,
    pub(crate) event_time: Option<u64>,
}

impl Message {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            ..Default::default()
        }
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_owned());
        self
    }

    pub fn property(mut self, name: &str, value: &str) -> Self {
        self.properties.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn event_time(mut self, event_time: u64) -> Self {
        self.event_time = Some(event_time);
        self
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}

/// A message that has been assigned its sequence id and is waiting to be admitted into a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    pub(crate) sequence_id: u64,
    pub(crate) message: Message,
}

impl PendingMessage {
    pub fn new(sequence_id: u64, message: Message) -> Self {
        Self {
            sequence_id,
            message,
        }
    }

    /// The number of bytes this message counts against the batch size ceiling.
    pub fn size(&self) -> u64 {
        self.message.payload.len() as u64
    }

    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }

    pub fn key(&self) -> Option<&str> {
        self.message.key.as_deref()
    }

    pub fn payload(&self) -> &Bytes {
        &self.message.payload
    }

    pub(crate) fn entry_metadata(&self) -> SingleMessageMetadata {
        SingleMessageMetadata {
            payload_size: self.message.payload.len() as u32,
            sequence_id: self.sequence_id,
            partition_key: self.message.key.clone(),
            properties: self.message.properties.clone(),
            event_time: self.message.event_time,
        }
    }
}
