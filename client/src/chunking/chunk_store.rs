use bytes::{Bytes, BytesMut};
use std::collections::HashMap;
use tessera_protocol::ChunkPayload;
use tessera_std::errors::{BatchError, Result};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug)]
pub struct ChunkEntry {
    pub(crate) seq_length: u32,
    pub(crate) total_length: u64,
    pub(crate) chunks: Vec<ChunkPayload>,
}

impl ChunkEntry {
    pub fn new(seq_length: u32) -> Self {
        Self {
            seq_length,
            total_length: 0,
            chunks: Vec::new(),
        }
    }

    fn received(&self) -> u32 {
        self.chunks.len() as u32
    }

    fn accepts(&self, seq_num: u32, seq_length: u32) -> bool {
        seq_length == self.seq_length && (1..=self.seq_length).contains(&seq_num)
    }

    /// Chunks are distinct positions of `1..=seq_length`, so a full count means every
    /// position is present.
    fn is_complete(&self) -> bool {
        self.received() == self.seq_length
            && self
                .chunks
                .iter()
                .all(|c| self.accepts(c.headers.seq_num, c.headers.seq_length))
    }
}

/// Collects the chunks of split batches until every piece of a sequence has arrived.
#[derive(Debug, Default)]
pub struct ChunkStore {
    pub(crate) store: HashMap<Uuid, ChunkEntry>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `chunk` under its sequence id.
    ///
    /// A chunk whose position was already received is ignored, as is a chunk whose position
    /// falls outside `1..=seq_length` or whose `seq_length` differs from the first chunk
    /// received for the sequence.
    pub fn insert(&mut self, chunk: ChunkPayload) {
        let headers = chunk.headers;

        if !(1..=headers.seq_length).contains(&headers.seq_num) {
            warn!(
                id = %headers.id,
                seq_num = headers.seq_num,
                seq_length = headers.seq_length,
                "ignoring chunk outside its sequence"
            );
            return;
        }

        let entry = self
            .store
            .entry(headers.id)
            .or_insert_with(|| ChunkEntry::new(headers.seq_length));

        if !entry.accepts(headers.seq_num, headers.seq_length) {
            warn!(
                id = %headers.id,
                seq_length = headers.seq_length,
                expected = entry.seq_length,
                "ignoring chunk with mismatched sequence length"
            );
            return;
        }

        if entry
            .chunks
            .iter()
            .any(|c| c.headers.seq_num == headers.seq_num)
        {
            return;
        }

        entry.total_length += chunk.payload.len() as u64;
        entry.chunks.push(chunk);
    }

    /// Returns `true` once every chunk of the sequence `id` has been received.
    pub fn is_complete(&self, id: &Uuid) -> bool {
        self.store
            .get(id)
            .map(ChunkEntry::is_complete)
            .unwrap_or(false)
    }

    /// Removes the sequence `id` from the store and joins its chunks in sequence order.
    ///
    /// # Errors
    ///
    /// Returns [BatchError::ChunkNotFound] if no chunk of `id` was inserted, or
    /// [BatchError::MissingChunks] if the sequence is incomplete. An incomplete sequence stays in
    /// the store.
    pub fn combine(&mut self, id: Uuid) -> Result<Bytes> {
        let entry = self.store.get(&id).ok_or(BatchError::ChunkNotFound(id))?;

        if !entry.is_complete() {
            return Err(BatchError::MissingChunks {
                id,
                received: entry.received(),
                expected: entry.seq_length,
            }
            .into());
        }

        let mut entry = self.store.remove(&id).ok_or(BatchError::ChunkNotFound(id))?;
        entry.chunks.sort_by_key(|chunk| chunk.headers.seq_num);

        let mut combined = BytesMut::with_capacity(entry.total_length as usize);

        for chunk in entry.chunks {
            combined.extend_from_slice(&chunk.payload);
        }

        Ok(combined.freeze())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
