use super::ChunkConfig;
use crate::batching::{
    BatchBuilder, BatchContainer, BatchState, BatchingStrategy, MultiBatch, OpSendMsg,
    PendingMessage,
};
use crate::config::PublisherConfig;
use tessera_protocol::ChunkHeaders;
use tessera_std::errors::{BatchVariant, Result};
use tracing::{debug, trace};
use uuid::Uuid;

/// Accumulates messages into one batch and splits its compressed payload into chunks when it
/// is larger than the configured chunk size.
///
/// Every chunk carries the metadata of the whole batch. The message counts of the batch are
/// attributed to its last chunk, so the counts of all units built by one flush add up to the
/// admitted messages.
#[derive(Debug)]
pub struct ChunkedBatchContainer {
    state: BatchState,
    messages: Vec<PendingMessage>,
    config: ChunkConfig,
}

impl ChunkedBatchContainer {
    /// Binds a container, using the [ChunkConfig] of a [BatchingStrategy::Chunked] strategy or
    /// [ChunkConfig::default] otherwise.
    pub fn bind(config: &PublisherConfig) -> Self {
        let chunk_config = match config.batch().get_strategy() {
            BatchingStrategy::Chunked(chunk_config) => chunk_config.clone(),
            _ => ChunkConfig::default(),
        };

        Self {
            state: BatchState::bind(config),
            messages: Vec::new(),
            config: chunk_config,
        }
    }

    pub fn chunk_config(&self) -> &ChunkConfig {
        &self.config
    }

    fn split(&self, op: OpSendMsg) -> Vec<OpSendMsg> {
        let chunk_size = self.config.chunk_size as usize;

        if op.payload.len() <= chunk_size {
            return vec![op];
        }

        let id = Uuid::new_v4();
        let seq_length = op.payload.len().div_ceil(chunk_size) as u32;

        debug!(
            %id,
            seq_length,
            compressed_size = op.payload.len(),
            "splitting batch into chunks"
        );

        (0..seq_length)
            .map(|index| {
                let start = index as usize * chunk_size;
                let end = (start + chunk_size).min(op.payload.len());
                let headers = ChunkHeaders::new(id, index + 1, seq_length);
                let last = headers.is_last();

                OpSendMsg {
                    metadata: op.metadata.clone(),
                    payload: op.payload.slice(start..end),
                    num_messages: if last { op.num_messages } else { 0 },
                    messages_size: if last { op.messages_size } else { 0 },
                    batched: true,
                    chunk: Some(headers),
                }
            })
            .collect()
    }
}

impl BatchContainer for ChunkedBatchContainer {
    fn has_room(&self, message: &PendingMessage) -> bool {
        self.state.has_room(message.size())
    }

    fn add(&mut self, message: PendingMessage) -> Result<()> {
        self.state.admit(&message)?;
        trace!(sequence_id = message.sequence_id(), size = message.size(), "admitted message");
        self.messages.push(message);
        Ok(())
    }

    fn num_messages(&self) -> u32 {
        self.state.num_messages()
    }

    fn current_size(&self) -> u64 {
        self.state.current_size()
    }

    fn peak_batch_size(&self) -> usize {
        self.state.peak_batch_size()
    }

    fn capability(&self) -> BatchVariant {
        BatchVariant::Multi
    }

    fn builder(&mut self) -> BatchBuilder<'_> {
        BatchBuilder::Multi(self)
    }
}

impl MultiBatch for ChunkedBatchContainer {
    fn build_send_batches(&mut self) -> Result<Vec<OpSendMsg>> {
        let messages = std::mem::take(&mut self.messages);
        self.state.reset();

        if messages.is_empty() {
            return Ok(Vec::new());
        }

        let op = self.state.encode(&messages, None)?;
        self.state.record_flush(std::slice::from_ref(&op));

        Ok(self.split(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batching::{BatchConfig, Message};
    use crate::chunking::ChunkStore;
    use crate::config::CompressionType;
    use bytes::Bytes;
    use fake::faker::lorem::en::Paragraph;
    use fake::Fake;
    use std::time::Duration;
    use tessera_protocol::{decode_batch, Frame};
    use crate::batching::test_utils::FailOnceComp;
    use std::sync::Arc;
    use tessera_std::errors::{CodecError, TesseraError};
    use tessera_std::traits::compression::Decompress;

    fn config(chunk_config: ChunkConfig, compression: CompressionType) -> PublisherConfig {
        let batch = BatchConfig::new(1000, Duration::from_millis(10))
            .strategy(BatchingStrategy::Chunked(chunk_config));

        PublisherConfig::new("persistent://public/default/logs", "producer-1")
            .compression(compression)
            .with_batching(batch)
    }

    fn fill(container: &mut ChunkedBatchContainer, count: u64) -> Vec<Bytes> {
        (0..count)
            .map(|seq| {
                let payload = Bytes::from(Paragraph(4..8).fake::<String>());
                container
                    .add(PendingMessage::new(seq, Message::new(payload.clone())))
                    .unwrap();
                payload
            })
            .collect()
    }

    #[test]
    fn small_batch_is_not_split() {
        let mut container =
            ChunkedBatchContainer::bind(&config(ChunkConfig::max(), CompressionType::None));
        container
            .add(PendingMessage::new(0, Message::new("tiny")))
            .unwrap();

        let ops = container.build_send_batches().unwrap();

        assert_eq!(ops.len(), 1);
        assert!(ops[0].chunk().is_none());
        assert!(matches!(ops[0].clone().into_frame(), Frame::BatchMessage(_)));
    }

    #[test]
    fn splits_large_batch_into_ordered_chunks() {
        let chunk_config = ChunkConfig::new(1024);
        let mut container = ChunkedBatchContainer::bind(&config(chunk_config, CompressionType::Zstd));
        let payloads = fill(&mut container, 50);

        let ops = container.build_send_batches().unwrap();
        assert!(ops.len() > 1);
        assert!(container.is_empty());

        let id = ops[0].chunk().unwrap().id;
        let seq_length = ops.len() as u32;

        for (index, op) in ops.iter().enumerate() {
            let headers = op.chunk().unwrap();
            assert_eq!(headers.id, id);
            assert_eq!(headers.seq_num, index as u32 + 1);
            assert_eq!(headers.seq_length, seq_length);
            assert!(op.compressed_size() <= 1024);
        }

        let total: u32 = ops.iter().map(OpSendMsg::num_messages).sum();
        assert_eq!(total, 50);

        let metadata = ops[0].metadata().clone();
        let mut store = ChunkStore::new();

        for op in ops {
            match op.into_frame() {
                Frame::Chunk(chunk) => store.insert(chunk),
                frame => panic!("expected a chunk frame, got {frame:?}"),
            }
        }

        let combined = store.combine(id).unwrap();
        let decompressed = metadata.compression.decompressor().decompress(combined).unwrap();
        let entries = decode_batch(decompressed, metadata.num_messages_in_batch).unwrap();
        let decoded: Vec<Bytes> = entries.into_iter().map(|entry| entry.payload).collect();

        assert_eq!(decoded, payloads);
    }

    #[test]
    fn empty_container_builds_no_units() {
        let mut container =
            ChunkedBatchContainer::bind(&config(ChunkConfig::small(), CompressionType::Lz4));
        assert!(container.build_send_batches().unwrap().is_empty());
    }

    #[test]
    fn failed_build_sends_no_chunks() {
        let mut container =
            ChunkedBatchContainer::bind(&config(ChunkConfig::new(1024), CompressionType::None));
        container.state.set_compressor(Arc::new(FailOnceComp::default()));
        fill(&mut container, 20);

        assert!(matches!(
            container.build_send_batches(),
            Err(TesseraError::Codec(CodecError::CompressFailure(_)))
        ));
        assert!(container.is_empty());
        assert_eq!(container.current_size(), 0);

        let payloads = fill(&mut container, 2);
        let ops = container.build_send_batches().unwrap();
        let total: u32 = ops.iter().map(OpSendMsg::num_messages).sum();

        assert_eq!(total, payloads.len() as u32);
    }
}
