use crate::Frame;
use bytes::{Buf, BufMut, BytesMut};
use std::mem::size_of;
use tessera_std::errors::{ProtocolError, TesseraError};
use tokio_util::codec::{Decoder, Encoder};

/// Largest frame body accepted by the broker.
pub const MAX_MESSAGE_SIZE: u64 = 5 * 1024 * 1024;
const LEN_MARKER_SIZE: usize = size_of::<u64>();
const TYPE_MARKER_SIZE: usize = size_of::<u8>();
const RESERVED_SIZE: usize = LEN_MARKER_SIZE + TYPE_MARKER_SIZE;

#[derive(Debug, Default)]
pub struct MessageCodec;

impl Encoder<Frame> for MessageCodec {
    type Error = TesseraError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let length = item.get_length()?;
        validate_payload_length(length)?;

        let message_type = item.get_type();

        dst.reserve(RESERVED_SIZE + length as usize);
        dst.put_u64(length);
        dst.put_u8(message_type);
        item.write_to_bytes(dst)?;

        Ok(())
    }
}

impl Decoder for MessageCodec {
    type Error = TesseraError;
    type Item = Frame;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < RESERVED_SIZE {
            return Ok(None);
        }

        let mut length_bytes = [0u8; LEN_MARKER_SIZE];
        length_bytes.copy_from_slice(&src[..LEN_MARKER_SIZE]);

        let length = u64::from_be_bytes(length_bytes);
        validate_payload_length(length)?;

        let bytes_read = src.len() - RESERVED_SIZE;

        if bytes_read < length as usize {
            src.reserve(length as usize - bytes_read);
            return Ok(None);
        }

        src.advance(LEN_MARKER_SIZE);

        let message_type = src.get_u8();
        let bytes = src.split_to(length as usize);
        let frame = Frame::try_from((message_type, bytes))?;

        Ok(Some(frame))
    }
}

fn validate_payload_length(length: u64) -> Result<(), TesseraError> {
    if length > MAX_MESSAGE_SIZE {
        Err(ProtocolError::PayloadTooLarge(length, MAX_MESSAGE_SIZE))?
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChunkHeaders, ChunkPayload, MessageMetadata, SendPayload, WireCompression};
    use bytes::Bytes;
    use uuid::Uuid;

    const BATCH_MESSAGE_TYPE: u8 = 0x1;

    fn metadata() -> MessageMetadata {
        let mut metadata =
            MessageMetadata::new("producer-1", "persistent://tenant/ns/topic", WireCompression::Lz4);
        metadata.publish_time = 1_700_000_000_000;
        metadata.sequence_id = 10;
        metadata.highest_sequence_id = 12;
        metadata.num_messages_in_batch = 3;
        metadata.uncompressed_size = 64;
        metadata
    }

    fn batch_frame() -> Frame {
        Frame::BatchMessage(SendPayload {
            metadata: metadata(),
            payload: Bytes::from("compressed batch"),
        })
    }

    #[test]
    fn writes_length_and_type_prefix() {
        let frame = batch_frame();
        let length = frame.get_length().unwrap();

        let mut codec = MessageCodec;
        let mut buffer = BytesMut::new();
        codec.encode(frame, &mut buffer).unwrap();

        assert_eq!(buffer.len(), RESERVED_SIZE + length as usize);
        assert_eq!(&buffer[..LEN_MARKER_SIZE], &length.to_be_bytes());
        assert_eq!(buffer[LEN_MARKER_SIZE], BATCH_MESSAGE_TYPE);
    }

    #[test]
    fn decodes_encoded_frames_in_order() {
        let chunk = Frame::Chunk(ChunkPayload {
            headers: ChunkHeaders::new(Uuid::new_v4(), 1, 2),
            metadata: metadata(),
            payload: Bytes::from("first half"),
        });

        let mut codec = MessageCodec;
        let mut buffer = BytesMut::new();
        codec.encode(batch_frame(), &mut buffer).unwrap();
        codec.encode(chunk.clone(), &mut buffer).unwrap();

        assert_eq!(codec.decode(&mut buffer).unwrap(), Some(batch_frame()));
        assert_eq!(codec.decode(&mut buffer).unwrap(), Some(chunk));
        assert_eq!(codec.decode(&mut buffer).unwrap(), None);
    }

    #[test]
    fn waits_for_complete_frame() {
        let mut codec = MessageCodec;
        let mut buffer = BytesMut::new();
        codec.encode(batch_frame(), &mut buffer).unwrap();

        let mut partial = buffer.split_to(buffer.len() - 4);
        assert_eq!(codec.decode(&mut partial).unwrap(), None);

        partial.unsplit(buffer);
        assert_eq!(codec.decode(&mut partial).unwrap(), Some(batch_frame()));
    }

    #[test]
    fn reports_partial_frame_at_end_of_stream() {
        let mut codec = MessageCodec;
        let mut buffer = BytesMut::new();
        codec.encode(batch_frame(), &mut buffer).unwrap();

        let mut partial = buffer.split_to(buffer.len() - 4);

        assert!(matches!(
            codec.decode_eof(&mut partial),
            Err(TesseraError::IoError(_))
        ));
    }

    #[test]
    fn fails_to_encode_if_payload_too_large() {
        let frame = Frame::Message(SendPayload {
            metadata: metadata(),
            payload: Bytes::from(vec![0u8; MAX_MESSAGE_SIZE as usize + 1]),
        });

        let mut codec = MessageCodec;
        let mut buffer = BytesMut::new();

        assert!(codec.encode(frame, &mut buffer).is_err());
    }

    #[test]
    fn fails_to_decode_if_length_too_large() {
        let mut codec = MessageCodec;
        let mut src = BytesMut::new();
        src.put_u64(MAX_MESSAGE_SIZE + 1);
        src.put_u8(BATCH_MESSAGE_TYPE);

        assert!(codec.decode(&mut src).is_err());
    }

    #[test]
    fn fails_to_decode_unknown_frame_type() {
        let mut codec = MessageCodec;
        let mut src = BytesMut::new();
        src.put_u64(0);
        src.put_u8(0x9);

        let result = codec.decode(&mut src);

        assert!(matches!(
            result,
            Err(TesseraError::Protocol(ProtocolError::UnknownMessageType(0x9)))
        ));
    }
}
