use bytes::Bytes;
use tessera_protocol::{ChunkHeaders, ChunkPayload, Frame, MessageMetadata, SendPayload};

/// A serialized send unit, ready to be assigned to the wire by the publisher.
#[derive(Debug, Clone, PartialEq)]
pub struct OpSendMsg {
    pub(crate) metadata: MessageMetadata,
    pub(crate) payload: Bytes,
    pub(crate) num_messages: u32,
    pub(crate) messages_size: u64,
    pub(crate) batched: bool,
    pub(crate) chunk: Option<ChunkHeaders>,
}

impl OpSendMsg {
    pub fn metadata(&self) -> &MessageMetadata {
        &self.metadata
    }

    /// The payload as it will be written to the wire, after compression.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn num_messages(&self) -> u32 {
        self.num_messages
    }

    /// Sum of the payload sizes of the messages in this unit, as counted at admission.
    pub fn messages_size(&self) -> u64 {
        self.messages_size
    }

    pub fn uncompressed_size(&self) -> u32 {
        self.metadata.uncompressed_size
    }

    pub fn compressed_size(&self) -> usize {
        self.payload.len()
    }

    pub fn sequence_id(&self) -> u64 {
        self.metadata.sequence_id
    }

    pub fn highest_sequence_id(&self) -> u64 {
        self.metadata.highest_sequence_id
    }

    pub fn is_batch(&self) -> bool {
        self.batched
    }

    pub fn chunk(&self) -> Option<&ChunkHeaders> {
        self.chunk.as_ref()
    }

    pub fn into_frame(self) -> Frame {
        match self.chunk {
            Some(headers) => Frame::Chunk(ChunkPayload {
                headers,
                metadata: self.metadata,
                payload: self.payload,
            }),
            None if self.batched => Frame::BatchMessage(SendPayload {
                metadata: self.metadata,
                payload: self.payload,
            }),
            None => Frame::Message(SendPayload {
                metadata: self.metadata,
                payload: self.payload,
            }),
        }
    }
}
