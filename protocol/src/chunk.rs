use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one piece of a batch payload that was split across several send units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkHeaders {
    pub id: Uuid,
    /// 1-based position of this chunk within its sequence.
    pub seq_num: u32,
    pub seq_length: u32,
}

impl ChunkHeaders {
    pub fn new(id: Uuid, seq_num: u32, seq_length: u32) -> Self {
        Self {
            id,
            seq_num,
            seq_length,
        }
    }

    pub fn is_last(&self) -> bool {
        self.seq_num == self.seq_length
    }
}
