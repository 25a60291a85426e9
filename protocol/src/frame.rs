use crate::{ChunkHeaders, MessageMetadata};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tessera_std::errors::{ProtocolError, Result, TesseraError};

const MESSAGE: u8 = 0x0;
const BATCH_MESSAGE: u8 = 0x1;
const CHUNK: u8 = 0x2;

/// A send unit as it is written to the publisher's transport.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Message(SendPayload),
    BatchMessage(SendPayload),
    Chunk(ChunkPayload),
}

impl Frame {
    pub fn get_length(&self) -> Result<u64> {
        Ok(match self {
            Self::Message(payload) => {
                bincode::serialized_size(payload).map_err(ProtocolError::SerdeError)?
            }
            Self::BatchMessage(payload) => {
                bincode::serialized_size(payload).map_err(ProtocolError::SerdeError)?
            }
            Self::Chunk(payload) => {
                bincode::serialized_size(payload).map_err(ProtocolError::SerdeError)?
            }
        })
    }

    pub fn get_type(&self) -> u8 {
        match self {
            Self::Message(_) => MESSAGE,
            Self::BatchMessage(_) => BATCH_MESSAGE,
            Self::Chunk(_) => CHUNK,
        }
    }

    pub fn metadata(&self) -> &MessageMetadata {
        match self {
            Self::Message(p) => &p.metadata,
            Self::BatchMessage(p) => &p.metadata,
            Self::Chunk(p) => &p.metadata,
        }
    }

    pub fn write_to_bytes(self, dst: &mut BytesMut) -> Result<()> {
        match self {
            Frame::Message(payload) => bincode::serialize_into(dst.writer(), &payload)
                .map_err(ProtocolError::SerdeError)?,
            Frame::BatchMessage(payload) => bincode::serialize_into(dst.writer(), &payload)
                .map_err(ProtocolError::SerdeError)?,
            Frame::Chunk(payload) => bincode::serialize_into(dst.writer(), &payload)
                .map_err(ProtocolError::SerdeError)?,
        }

        Ok(())
    }

    pub fn unwrap_payload(self) -> Bytes {
        match self {
            Self::Message(p) => p.payload,
            Self::BatchMessage(p) => p.payload,
            Self::Chunk(p) => p.payload,
        }
    }
}

impl TryFrom<(u8, BytesMut)> for Frame {
    type Error = TesseraError;

    fn try_from(
        (message_type, bytes): (u8, BytesMut),
    ) -> Result<Self, <Frame as TryFrom<(u8, BytesMut)>>::Error> {
        let frame = match message_type {
            MESSAGE => {
                Frame::Message(bincode::deserialize(&bytes).map_err(ProtocolError::SerdeError)?)
            }
            BATCH_MESSAGE => Frame::BatchMessage(
                bincode::deserialize(&bytes).map_err(ProtocolError::SerdeError)?,
            ),
            CHUNK => Frame::Chunk(bincode::deserialize(&bytes).map_err(ProtocolError::SerdeError)?),
            _type => return Err(ProtocolError::UnknownMessageType(_type).into()),
        };

        Ok(frame)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendPayload {
    pub metadata: MessageMetadata,
    pub payload: Bytes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkPayload {
    pub headers: ChunkHeaders,
    pub metadata: MessageMetadata,
    pub payload: Bytes,
}
