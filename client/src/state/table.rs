use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tessera_std::errors::{Result, StateError};
use tokio::sync::Mutex;

const COUNTER_SIZE: usize = std::mem::size_of::<i64>();

/// A byte-keyed store holding plain values and numeric counters.
#[async_trait]
pub trait Table: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: Bytes) -> Result<Option<Bytes>>;

    async fn put(&self, key: Bytes, value: Bytes) -> Result<()>;

    /// Adds `amount` to the counter stored under `key`, starting from zero if it is absent.
    async fn increment(&self, key: Bytes, amount: i64) -> Result<()>;

    /// Returns the counter stored under `key`, or zero if it is absent.
    async fn get_number(&self, key: Bytes) -> Result<i64>;
}

/// An in-process [Table].
///
/// Counters share the value space with plain values and are stored as 8-byte big-endian
/// integers, so a counter can also be read back with [get](Table::get).
#[derive(Debug, Default)]
pub struct MemoryTable {
    entries: Mutex<HashMap<Bytes, Bytes>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

fn decode_counter(key: &Bytes, value: &Bytes) -> Result<i64> {
    let bytes: [u8; COUNTER_SIZE] = value[..]
        .try_into()
        .map_err(|_| StateError::MalformedCounter(String::from_utf8_lossy(key).into_owned()))?;

    Ok(i64::from_be_bytes(bytes))
}

#[async_trait]
impl Table for MemoryTable {
    async fn get(&self, key: Bytes) -> Result<Option<Bytes>> {
        Ok(self.entries.lock().await.get(&key).cloned())
    }

    async fn put(&self, key: Bytes, value: Bytes) -> Result<()> {
        self.entries.lock().await.insert(key, value);
        Ok(())
    }

    async fn increment(&self, key: Bytes, amount: i64) -> Result<()> {
        let mut entries = self.entries.lock().await;

        let current = match entries.get(&key) {
            Some(value) => decode_counter(&key, value)?,
            None => 0,
        };

        let next = current.wrapping_add(amount);
        entries.insert(key, Bytes::copy_from_slice(&next.to_be_bytes()));

        Ok(())
    }

    async fn get_number(&self, key: Bytes) -> Result<i64> {
        match self.entries.lock().await.get(&key) {
            Some(value) => decode_counter(&key, value),
            None => Ok(0),
        }
    }
}
