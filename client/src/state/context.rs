use super::Table;
use async_trait::async_trait;
use bytes::Bytes;
use tessera_std::errors::Result;

/// String-keyed access to state and counters.
#[async_trait]
pub trait StateContext: Send + Sync {
    async fn incr_counter(&self, key: &str, amount: i64) -> Result<()>;

    async fn put(&self, key: &str, value: Bytes) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    async fn get_counter(&self, key: &str) -> Result<i64>;
}

/// A [StateContext] over a [Table], encoding every key as UTF-8.
#[derive(Debug)]
pub struct TableStateContext<T> {
    table: T,
}

impl<T: Table> TableStateContext<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &T {
        &self.table
    }
}

fn encode_key(key: &str) -> Bytes {
    Bytes::copy_from_slice(key.as_bytes())
}

#[async_trait]
impl<T: Table> StateContext for TableStateContext<T> {
    async fn incr_counter(&self, key: &str, amount: i64) -> Result<()> {
        self.table.increment(encode_key(key), amount).await
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        self.table.put(encode_key(key), value).await
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.table.get(encode_key(key)).await
    }

    async fn get_counter(&self, key: &str) -> Result<i64> {
        self.table.get_number(encode_key(key)).await
    }
}
