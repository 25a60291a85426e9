use crate::constants::MAX_BATCH_SIZE_BYTES;
use crate::utils::units;

/// Tunes how a chunked batch is split into send units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    pub(crate) chunk_size: u64,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::max()
    }
}

impl ChunkConfig {
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero or larger than a whole batch.
    pub fn new(chunk_size: u64) -> Self {
        assert!(chunk_size > 0, "chunks must carry at least one byte");
        assert!(chunk_size <= MAX_BATCH_SIZE_BYTES);

        Self { chunk_size }
    }

    pub fn max() -> Self {
        Self::new(units::kilobyte(64))
    }

    pub fn medium() -> Self {
        Self::new(units::kilobyte(32))
    }

    pub fn small() -> Self {
        Self::new(units::kilobyte(16))
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }
}
