use crate::batching::{
    BatchContainer, BatchingStrategy, DefaultBatchContainer, KeyBasedBatchContainer, Message,
    OpSendMsg, PendingMessage,
};
use crate::chunking::ChunkedBatchContainer;
use crate::config::PublisherConfig;
use crate::constants::MAX_BATCH_SIZE_BYTES;
use bytes::Bytes;
use futures::{Sink, SinkExt};
use std::time::Instant;
use tessera_protocol::{Comp, Frame, MessageMetadata};
use tessera_std::errors::{CodecError, Result, TesseraError};
use tessera_std::traits::compression::Compress;
use tracing::{debug, warn};

type Container = Box<dyn BatchContainer + Send>;

/// Publishes messages to a topic by writing send units into a [Sink] of [Frame]s.
///
/// When batching is enabled, messages are admitted into the batch container selected by the
/// configured [BatchingStrategy] and written as [Frame::BatchMessage] or [Frame::Chunk] units
/// once the batch is full or its publish delay has expired. Messages larger than
/// [MAX_BATCH_SIZE_BYTES] can never join a batch, and are written as their own
/// [Frame::Message] after any pending batch, so the transport still observes messages in
/// sequence order.
///
/// The sink is any transport accepting frames, such as a `FramedWrite` over a
/// [MessageCodec](tessera_protocol::MessageCodec).
pub struct Publisher<S> {
    config: PublisherConfig,
    sink: S,
    container: Option<Container>,
    compressor: Comp,
    next_sequence_id: u64,
    last_flush: Instant,
}

impl<S> Publisher<S>
where
    S: Sink<Frame> + Unpin,
    S::Error: Into<anyhow::Error>,
{
    pub fn new(config: PublisherConfig, sink: S) -> Self {
        let container = bind_container(&config);
        let compressor = config.wire_compression().compressor();

        Self {
            config,
            sink,
            container,
            compressor,
            next_sequence_id: 0,
            last_flush: Instant::now(),
        }
    }

    /// Publishes `payload` without a key or properties, returning its sequence id.
    pub async fn send(&mut self, payload: impl Into<Bytes>) -> Result<u64> {
        self.send_message(Message::new(payload)).await
    }

    /// Publishes `message`, returning the sequence id assigned to it.
    ///
    /// With batching enabled the message is only written once its batch is flushed.
    ///
    /// # Errors
    ///
    /// Returns [Err] if a batch flushed to make room for `message` fails to build or to be
    /// written, or if an unbatched message fails to be compressed or written.
    pub async fn send_message(&mut self, message: Message) -> Result<u64> {
        let sequence_id = self.next_sequence_id;
        self.next_sequence_id += 1;

        let pending = PendingMessage::new(sequence_id, message);

        if self.container.is_none() {
            self.send_unbatched(pending).await?;
            return Ok(sequence_id);
        }

        if pending.size() > MAX_BATCH_SIZE_BYTES {
            warn!(
                sequence_id,
                size = pending.size(),
                limit = MAX_BATCH_SIZE_BYTES,
                "message exceeds the batch size limit, sending unbatched"
            );

            self.flush().await?;
            self.send_unbatched(pending).await?;
            return Ok(sequence_id);
        }

        if !self.has_room(&pending) {
            self.flush().await?;
        }

        let max_messages = self.config.batch().get_max_messages();
        let full = match self.container.as_mut() {
            Some(container) => {
                container.add(pending)?;
                container.num_messages() >= max_messages
            }
            None => false,
        };

        if full {
            self.flush().await?;
        }

        Ok(sequence_id)
    }

    /// Builds the pending batch, if any, and writes every unit it produces to the sink.
    ///
    /// # Errors
    ///
    /// Returns [Err] if the batch fails to build or the sink fails to accept it. The pending
    /// batch is discarded either way.
    pub async fn flush(&mut self) -> Result<()> {
        let ops = match self.container.as_mut() {
            Some(container) if !container.is_empty() => {
                let num_messages = container.num_messages();
                let current_size = container.current_size();
                let ops = container.build_all()?;

                debug!(
                    topic = self.config.topic(),
                    num_messages,
                    current_size,
                    units = ops.len(),
                    "flushing batch"
                );

                ops
            }
            _ => Vec::new(),
        };

        for op in ops {
            self.sink.feed(op.into_frame()).await.map_err(transport)?;
        }

        self.sink.flush().await.map_err(transport)?;
        self.last_flush = Instant::now();

        Ok(())
    }

    /// Flushes a non-empty batch once the configured publish delay has elapsed since the last
    /// flush, returning `true` if a flush happened.
    pub async fn flush_if_expired(&mut self, now: Instant) -> Result<bool> {
        let expired = now.saturating_duration_since(self.last_flush)
            >= self.config.batch().get_max_publish_delay();

        if expired && self.pending_messages() > 0 {
            self.flush().await?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Flushes the pending batch and closes the sink, returning it.
    ///
    /// It is highly recommended to invoke this method once no new messages will be published,
    /// as messages still waiting in a batch are otherwise never written.
    pub async fn finish(mut self) -> Result<S> {
        self.flush().await?;
        self.sink.close().await.map_err(transport)?;
        Ok(self.sink)
    }

    pub fn pending_messages(&self) -> u32 {
        self.container
            .as_ref()
            .map(|container| container.num_messages())
            .unwrap_or(0)
    }

    pub fn pending_size(&self) -> u64 {
        self.container
            .as_ref()
            .map(|container| container.current_size())
            .unwrap_or(0)
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Returns the sink, discarding any pending batch.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn has_room(&self, message: &PendingMessage) -> bool {
        self.container
            .as_ref()
            .map(|container| container.has_room(message))
            .unwrap_or(false)
    }

    async fn send_unbatched(&mut self, pending: PendingMessage) -> Result<()> {
        let PendingMessage {
            sequence_id,
            message,
        } = pending;

        let size = message.payload.len();
        let payload = self
            .compressor
            .compress(message.payload)
            .map_err(CodecError::CompressFailure)?;

        let mut metadata = MessageMetadata::new(
            self.config.producer_name(),
            self.config.topic(),
            self.config.wire_compression(),
        );
        metadata.sequence_id = sequence_id;
        metadata.highest_sequence_id = sequence_id;
        metadata.uncompressed_size = size as u32;
        metadata.partition_key = message.key;
        metadata.properties = message.properties;
        metadata.event_time = message.event_time;

        let op = OpSendMsg {
            metadata,
            payload,
            num_messages: 1,
            messages_size: size as u64,
            batched: false,
            chunk: None,
        };

        self.sink.send(op.into_frame()).await.map_err(transport)
    }
}

fn bind_container(config: &PublisherConfig) -> Option<Container> {
    if !config.batching_enabled() {
        return None;
    }

    let container: Container = match config.batch().get_strategy() {
        BatchingStrategy::Default => Box::new(DefaultBatchContainer::bind(config)),
        BatchingStrategy::KeyBased => Box::new(KeyBasedBatchContainer::bind(config)),
        BatchingStrategy::Chunked(_) => Box::new(ChunkedBatchContainer::bind(config)),
    };

    Some(container)
}

fn transport<E: Into<anyhow::Error>>(err: E) -> TesseraError {
    TesseraError::Transport(err.into())
}
