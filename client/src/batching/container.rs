use super::{OpSendMsg, PendingMessage};
use crate::config::PublisherConfig;
use crate::constants::{INITIAL_BATCH_BUFFER_SIZE, MAX_BATCH_SIZE_BYTES};
use bytes::BytesMut;
use std::fmt::Debug;
use tessera_protocol::{encode_batch_entry, Comp, MessageMetadata, WireCompression};
use tessera_std::errors::{BatchError, BatchVariant, CodecError, Result};
use tessera_std::traits::compression::Compress;

/// The build operation a container implements, handed out by [BatchContainer::builder].
pub enum BatchBuilder<'a> {
    Single(&'a mut dyn SingleBatch),
    Multi(&'a mut dyn MultiBatch),
}

/// Gates admission into the in-flight batch of one publisher.
///
/// A container is owned by a single publisher send path and is never shared, so every
/// admission check followed by an [add](BatchContainer::add) happens without interleaving.
///
/// Containers declare which build they implement through [capability](BatchContainer::capability)
/// and [builder](BatchContainer::builder). The provided `build_*` methods dispatch on that
/// declaration and report [BatchError::Unsupported] when the other variant is requested.
pub trait BatchContainer: Debug {
    /// Returns `true` if `message` can be admitted without either ceiling being exceeded.
    fn has_room(&self, message: &PendingMessage) -> bool;

    /// Admits `message` at the back of the batch.
    ///
    /// # Errors
    ///
    /// Returns [BatchError::AdmissionRejected] without modifying the batch if
    /// [has_room](BatchContainer::has_room) would have returned `false`.
    fn add(&mut self, message: PendingMessage) -> Result<()>;

    fn num_messages(&self) -> u32;

    /// Sum of the uncompressed payload sizes of the admitted messages.
    fn current_size(&self) -> u64;

    /// The largest serialized size of a single flush so far, summed over every unit the flush
    /// produced. Starts at [INITIAL_BATCH_BUFFER_SIZE] and never decreases.
    fn peak_batch_size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.num_messages() == 0
    }

    fn capability(&self) -> BatchVariant;

    fn builder(&mut self) -> BatchBuilder<'_>;

    /// Builds the batch into exactly one send unit.
    fn build_single(&mut self) -> Result<OpSendMsg> {
        match self.builder() {
            BatchBuilder::Single(builder) => builder.build_send_batch(),
            BatchBuilder::Multi(_) => Err(BatchError::Unsupported(BatchVariant::Single).into()),
        }
    }

    /// Builds the batch into a sequence of send units.
    fn build_multi(&mut self) -> Result<Vec<OpSendMsg>> {
        match self.builder() {
            BatchBuilder::Single(_) => Err(BatchError::Unsupported(BatchVariant::Multi).into()),
            BatchBuilder::Multi(builder) => builder.build_send_batches(),
        }
    }

    /// Builds the batch with whichever variant the container implements.
    fn build_all(&mut self) -> Result<Vec<OpSendMsg>> {
        match self.builder() {
            BatchBuilder::Single(builder) => Ok(vec![builder.build_send_batch()?]),
            BatchBuilder::Multi(builder) => builder.build_send_batches(),
        }
    }
}

/// A batching strategy that flushes into a single send unit.
pub trait SingleBatch {
    /// Consumes every admitted message and resets the container, whether or not the build
    /// succeeds.
    fn build_send_batch(&mut self) -> Result<OpSendMsg>;
}

/// A batching strategy that flushes into several send units.
pub trait MultiBatch {
    /// Consumes every admitted message and resets the container, whether or not the build
    /// succeeds. An empty container builds no units.
    fn build_send_batches(&mut self) -> Result<Vec<OpSendMsg>>;
}

/// Accounting and serialization shared by every container.
pub struct BatchState {
    topic: String,
    producer_name: String,
    compression: WireCompression,
    compressor: Comp,
    max_messages: u32,
    num_messages: u32,
    current_size: u64,
    peak_batch_size: usize,
}

impl BatchState {
    pub fn bind(config: &PublisherConfig) -> Self {
        let compression = config.wire_compression();

        Self {
            topic: config.topic().to_owned(),
            producer_name: config.producer_name().to_owned(),
            compression,
            compressor: compression.compressor(),
            max_messages: config.batch().get_max_messages(),
            num_messages: 0,
            current_size: 0,
            peak_batch_size: INITIAL_BATCH_BUFFER_SIZE,
        }
    }

    pub fn has_room(&self, size: u64) -> bool {
        self.current_size + size <= MAX_BATCH_SIZE_BYTES && self.num_messages < self.max_messages
    }

    pub fn admit(&mut self, message: &PendingMessage) -> Result<()> {
        let size = message.size();

        if !self.has_room(size) {
            return Err(BatchError::AdmissionRejected {
                size,
                current_size: self.current_size,
                num_messages: self.num_messages,
            }
            .into());
        }

        self.num_messages += 1;
        self.current_size += size;

        Ok(())
    }

    pub fn reset(&mut self) {
        self.num_messages = 0;
        self.current_size = 0;
    }

    pub fn num_messages(&self) -> u32 {
        self.num_messages
    }

    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    pub fn peak_batch_size(&self) -> usize {
        self.peak_batch_size
    }

    pub fn max_messages(&self) -> u32 {
        self.max_messages
    }

    /// Raises the peak to the serialized size of a flush made of `ops`.
    pub fn record_flush(&mut self, ops: &[OpSendMsg]) {
        let flushed: usize = ops.iter().map(|op| op.uncompressed_size() as usize).sum();
        self.peak_batch_size = self.peak_batch_size.max(flushed);
    }

    #[cfg(test)]
    pub(crate) fn set_compressor(&mut self, compressor: Comp) {
        self.compressor = compressor;
    }

    /// Serializes `messages` in order into one batch payload and compresses it.
    /// Callers raise the peak with [record_flush](BatchState::record_flush) once the whole
    /// flush is built.
    pub fn encode(
        &self,
        messages: &[PendingMessage],
        partition_key: Option<String>,
    ) -> Result<OpSendMsg> {
        let (first, last) = match (messages.first(), messages.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(BatchError::EmptyBatch.into()),
        };

        let mut buffer = BytesMut::with_capacity(self.peak_batch_size);

        for message in messages {
            encode_batch_entry(&mut buffer, &message.entry_metadata(), message.payload())?;
        }

        let uncompressed_size = buffer.len();

        let payload = self
            .compressor
            .compress(buffer.freeze())
            .map_err(CodecError::CompressFailure)?;

        let mut metadata = MessageMetadata::new(&self.producer_name, &self.topic, self.compression);
        metadata.sequence_id = first.sequence_id();
        metadata.highest_sequence_id = last.sequence_id();
        metadata.uncompressed_size = uncompressed_size as u32;
        metadata.num_messages_in_batch = messages.len() as u32;
        metadata.partition_key = partition_key;

        Ok(OpSendMsg {
            metadata,
            payload,
            num_messages: messages.len() as u32,
            messages_size: messages.iter().map(PendingMessage::size).sum(),
            batched: true,
            chunk: None,
        })
    }
}

impl Debug for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchState")
            .field("topic", &self.topic)
            .field("producer_name", &self.producer_name)
            .field("compression", &self.compression)
            .field("max_messages", &self.max_messages)
            .field("num_messages", &self.num_messages)
            .field("current_size", &self.current_size)
            .field("peak_batch_size", &self.peak_batch_size)
            .finish_non_exhaustive()
    }
}
