use super::{BatchBuilder, BatchContainer, BatchState, OpSendMsg, PendingMessage, SingleBatch};
use crate::config::PublisherConfig;
use tessera_std::errors::{BatchVariant, Result};
use tracing::trace;

/// Accumulates messages in admission order and flushes them as one send unit.
#[derive(Debug)]
pub struct DefaultBatchContainer {
    state: BatchState,
    messages: Vec<PendingMessage>,
}

impl DefaultBatchContainer {
    pub fn bind(config: &PublisherConfig) -> Self {
        let state = BatchState::bind(config);
        let messages = Vec::with_capacity(state.max_messages().min(1024) as usize);

        Self { state, messages }
    }

    pub fn messages(&self) -> &[PendingMessage] {
        &self.messages
    }
}

impl BatchContainer for DefaultBatchContainer {
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
        BatchVariant::Single
    }

    fn builder(&mut self) -> BatchBuilder<'_> {
        BatchBuilder::Single(self)
    }
}

impl SingleBatch for DefaultBatchContainer {
    fn build_send_batch(&mut self) -> Result<OpSendMsg> {
        let messages = std::mem::take(&mut self.messages);
        self.state.reset();

        let op = self.state.encode(&messages, None)?;
        self.state.record_flush(std::slice::from_ref(&op));

        Ok(op)
    }
}
