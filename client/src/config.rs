//! Publisher configuration captured by a batch container when it is bound.
//!
//! A [PublisherConfig] is a plain value: containers copy what they need out of it at
//! construction, so changing a configuration afterwards never affects a live batch.

use crate::batching::BatchConfig;
use tessera_protocol::WireCompression;

/// Compression applied to every send unit produced by a publisher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionType {
    #[default]
    None,
    Lz4,
    Zlib,
    Zstd,
    Snappy,
}

impl From<CompressionType> for WireCompression {
    fn from(value: CompressionType) -> Self {
        match value {
            CompressionType::None => WireCompression::None,
            CompressionType::Lz4 => WireCompression::Lz4,
            CompressionType::Zlib => WireCompression::Zlib,
            CompressionType::Zstd => WireCompression::Zstd,
            CompressionType::Snappy => WireCompression::Snappy,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub(crate) topic: String,
    pub(crate) producer_name: String,
    pub(crate) compression: CompressionType,
    pub(crate) batching_enabled: bool,
    pub(crate) batch: BatchConfig,
}

impl PublisherConfig {
    /// Creates a configuration with batching enabled using [BatchConfig::default].
    pub fn new(topic: &str, producer_name: &str) -> Self {
        Self {
            topic: topic.to_owned(),
            producer_name: producer_name.to_owned(),
            compression: CompressionType::default(),
            batching_enabled: true,
            batch: BatchConfig::default(),
        }
    }

    pub fn compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_batching(mut self, config: BatchConfig) -> Self {
        self.batching_enabled = true;
        self.batch = config;
        self
    }

    /// Every message is sent as its own unit.
    pub fn without_batching(mut self) -> Self {
        self.batching_enabled = false;
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn producer_name(&self) -> &str {
        &self.producer_name
    }

    pub fn compression_type(&self) -> CompressionType {
        self.compression
    }

    pub fn wire_compression(&self) -> WireCompression {
        self.compression.into()
    }

    pub fn batching_enabled(&self) -> bool {
        self.batching_enabled
    }

    pub fn batch(&self) -> &BatchConfig {
        &self.batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_compression_to_wire_type() {
        let pairs = [
            (CompressionType::None, WireCompression::None),
            (CompressionType::Lz4, WireCompression::Lz4),
            (CompressionType::Zlib, WireCompression::Zlib),
            (CompressionType::Zstd, WireCompression::Zstd),
            (CompressionType::Snappy, WireCompression::Snappy),
        ];

        for (compression, expected) in pairs {
            let config = PublisherConfig::new("topic", "producer").compression(compression);
            assert_eq!(config.wire_compression(), expected);
        }
    }

    #[test]
    fn batching_can_be_disabled() {
        let config = PublisherConfig::new("topic", "producer").without_batching();
        assert!(!config.batching_enabled());

        let config = config.with_batching(BatchConfig::minimal_payload());
        assert!(config.batching_enabled());
        assert_eq!(config.batch().get_max_messages(), 10);
    }
}
