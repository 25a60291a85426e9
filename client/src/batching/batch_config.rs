use crate::chunking::ChunkConfig;
use crate::constants::{BATCHING_MAX_MESSAGES_DEFAULT, BATCHING_MAX_PUBLISH_DELAY_DEFAULT};
use std::time::Duration;

/// Selects the batch container a publisher binds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BatchingStrategy {
    /// Every flush produces a single send unit.
    #[default]
    Default,
    /// Every flush produces one send unit per message key.
    KeyBased,
    /// Every flush produces one batch, split into chunks when its compressed payload is larger
    /// than the configured chunk size.
    Chunked(ChunkConfig),
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub(crate) max_messages: u32,
    pub(crate) max_publish_delay: Duration,
    pub(crate) strategy: BatchingStrategy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(
            BATCHING_MAX_MESSAGES_DEFAULT,
            BATCHING_MAX_PUBLISH_DELAY_DEFAULT,
        )
    }
}

impl BatchConfig {
    pub fn new(max_messages: u32, max_publish_delay: Duration) -> Self {
        assert!(max_messages > 0, "a batch must admit at least one message");

        Self {
            max_messages,
            max_publish_delay,
            strategy: BatchingStrategy::default(),
        }
    }

    pub fn high_throughput() -> Self {
        Self::new(250, Duration::from_millis(100))
    }

    pub fn balanced() -> Self {
        Self::new(100, Duration::from_millis(100))
    }

    pub fn minimal_payload() -> Self {
        Self::new(10, Duration::from_millis(100))
    }

    pub fn max_messages(mut self, max_messages: u32) -> Self {
        assert!(max_messages > 0, "a batch must admit at least one message");
        self.max_messages = max_messages;
        self
    }

    pub fn max_publish_delay(mut self, delay: Duration) -> Self {
        self.max_publish_delay = delay;
        self
    }

    pub fn strategy(mut self, strategy: BatchingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn get_max_messages(&self) -> u32 {
        self.max_messages
    }

    pub fn get_max_publish_delay(&self) -> Duration {
        self.max_publish_delay
    }

    pub fn get_strategy(&self) -> &BatchingStrategy {
        &self.strategy
    }
}
