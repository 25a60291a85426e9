//! Encoding of the entries that make up an uncompressed batch payload.
//!
//! A batch payload is the concatenation, in admission order, of entries laid out as:
//!
//! ```text
//! +----------------+------------------------------+-----------------+
//! | u32 meta len   | bincode SingleMessageMetadata | payload bytes   |
//! +----------------+------------------------------+-----------------+
//! ```
//!
//! The number of entries is not part of the payload. It travels in the batch
//! [MessageMetadata](crate::MessageMetadata) instead.

use crate::{MessageMetadata, SingleMessageMetadata};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::mem::size_of;
use tessera_std::errors::{CodecError, ProtocolError, Result};
use tessera_std::traits::compression::Decompress;

const META_LEN_MARKER_SIZE: usize = size_of::<u32>();

/// A decoded batch entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub metadata: SingleMessageMetadata,
    pub payload: Bytes,
}

/// Appends one entry to a batch payload under construction.
pub fn encode_batch_entry(
    dst: &mut BytesMut,
    metadata: &SingleMessageMetadata,
    payload: &[u8],
) -> Result<()> {
    let meta_len = bincode::serialized_size(metadata).map_err(ProtocolError::SerdeError)?;

    dst.reserve(META_LEN_MARKER_SIZE + meta_len as usize + payload.len());
    dst.put_u32(meta_len as u32);
    bincode::serialize_into((&mut *dst).writer(), metadata).map_err(ProtocolError::SerdeError)?;
    dst.extend_from_slice(payload);

    Ok(())
}

/// Splits an uncompressed batch payload back into its `num_messages` entries.
///
/// `num_messages` comes from the wire, so it only bounds the allocation as far as `bytes` can
/// actually hold that many entries.
pub fn decode_batch(mut bytes: Bytes, num_messages: u32) -> Result<Vec<BatchEntry>> {
    let capacity = (num_messages as usize).min(bytes.remaining() / META_LEN_MARKER_SIZE);
    let mut entries = Vec::with_capacity(capacity);

    for _ in 0..num_messages {
        if bytes.remaining() < META_LEN_MARKER_SIZE {
            return Err(ProtocolError::MalformedBatch("truncated entry length").into());
        }

        let meta_len = bytes.get_u32() as usize;

        if bytes.remaining() < meta_len {
            return Err(ProtocolError::MalformedBatch("truncated entry metadata").into());
        }

        let meta_bytes = bytes.split_to(meta_len);
        let metadata: SingleMessageMetadata =
            bincode::deserialize(&meta_bytes).map_err(ProtocolError::SerdeError)?;

        let payload_size = metadata.payload_size as usize;

        if bytes.remaining() < payload_size {
            return Err(ProtocolError::MalformedBatch("truncated entry payload").into());
        }

        let payload = bytes.split_to(payload_size);
        entries.push(BatchEntry { metadata, payload });
    }

    if bytes.has_remaining() {
        return Err(ProtocolError::MalformedBatch("trailing bytes after last entry").into());
    }

    Ok(entries)
}

/// Decompresses the payload of a batch unit with the compression named in its `metadata`, then
/// splits it into `metadata.num_messages_in_batch` entries.
pub fn decode_batch_unit(metadata: &MessageMetadata, payload: Bytes) -> Result<Vec<BatchEntry>> {
    let payload = metadata
        .compression
        .decompressor()
        .decompress(payload)
        .map_err(CodecError::DecompressFailure)?;

    decode_batch(payload, metadata.num_messages_in_batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WireCompression;
    use tessera_std::errors::TesseraError;
    use tessera_std::traits::compression::Compress;

    fn metadata(sequence_id: u64, payload: &[u8]) -> SingleMessageMetadata {
        SingleMessageMetadata {
            payload_size: payload.len() as u32,
            sequence_id,
            ..Default::default()
        }
    }

    fn encode(messages: &[&[u8]]) -> Bytes {
        let mut dst = BytesMut::new();

        for (i, message) in messages.iter().enumerate() {
            encode_batch_entry(&mut dst, &metadata(i as u64, message), message).unwrap();
        }

        dst.freeze()
    }

    #[test]
    fn decodes_entries_in_order() {
        let payload = encode(&[b"First message", b"Second message", b"Third message"]);

        let entries = decode_batch(payload, 3).unwrap();
        let payloads: Vec<&[u8]> = entries.iter().map(|e| &e.payload[..]).collect();
        let sequence_ids: Vec<u64> = entries.iter().map(|e| e.metadata.sequence_id).collect();

        assert_eq!(
            payloads,
            vec![&b"First message"[..], b"Second message", b"Third message"]
        );
        assert_eq!(sequence_ids, vec![0, 1, 2]);
    }

    #[test]
    fn keeps_entry_metadata() {
        let mut meta = metadata(42, b"payload");
        meta.partition_key = Some("user-1".to_owned());
        meta.event_time = Some(1_700_000_000_000);
        meta.properties.insert("trace".to_owned(), "abc".to_owned());

        let mut dst = BytesMut::new();
        encode_batch_entry(&mut dst, &meta, b"payload").unwrap();

        let entries = decode_batch(dst.freeze(), 1).unwrap();
        assert_eq!(entries[0].metadata, meta);
    }

    #[test]
    fn fails_on_truncated_payload() {
        let payload = encode(&[b"First message", b"Second message"]);
        let truncated = payload.slice(..payload.len() - 3);

        assert!(decode_batch(truncated, 2).is_err());
    }

    #[test]
    fn fails_when_count_exceeds_entries() {
        let payload = encode(&[b"only one"]);
        assert!(decode_batch(payload, 2).is_err());
    }

    #[test]
    fn fails_on_trailing_bytes() {
        let payload = encode(&[b"First message", b"Second message"]);
        assert!(decode_batch(payload, 1).is_err());
    }

    #[test]
    fn fails_on_count_larger_than_payload() {
        assert!(matches!(
            decode_batch(Bytes::new(), u32::MAX),
            Err(TesseraError::Protocol(ProtocolError::MalformedBatch(_)))
        ));

        let payload = encode(&[b"First message"]);
        assert!(matches!(
            decode_batch(payload, u32::MAX),
            Err(TesseraError::Protocol(ProtocolError::MalformedBatch(_)))
        ));
    }

    #[test]
    fn decodes_compressed_unit() {
        let compression = WireCompression::Zstd;
        let payload = compression
            .compressor()
            .compress(encode(&[b"First message", b"Second message"]))
            .unwrap();

        let mut meta = MessageMetadata::new("producer-1", "topic", compression);
        meta.num_messages_in_batch = 2;

        let entries = decode_batch_unit(&meta, payload).unwrap();
        assert_eq!(entries[1].payload, Bytes::from_static(b"Second message"));
    }

    #[test]
    fn reports_decompress_failure() {
        let mut meta = MessageMetadata::new("producer-1", "topic", WireCompression::Snappy);
        meta.num_messages_in_batch = 1;

        let garbage = Bytes::from_static(&[0x05, 0xff]);

        assert!(matches!(
            decode_batch_unit(&meta, garbage),
            Err(TesseraError::Codec(CodecError::DecompressFailure(_)))
        ));
    }
}
