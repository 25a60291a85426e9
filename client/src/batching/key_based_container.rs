use super::{BatchBuilder, BatchContainer, BatchState, MultiBatch, OpSendMsg, PendingMessage};
use crate::config::PublisherConfig;
use tessera_std::errors::{BatchVariant, Result};
use tracing::trace;

type KeyGroup = (Option<String>, Vec<PendingMessage>);

/// Accumulates messages into one group per message key and flushes each group as its own
/// send unit.
///
/// Messages without a key share a single group. Groups are flushed in the order their first
/// message was admitted, and every group keeps its messages in admission order. Both ceilings
/// apply to the container as a whole rather than to each group.
#[derive(Debug)]
pub struct KeyBasedBatchContainer {
    state: BatchState,
    groups: Vec<KeyGroup>,
}

impl KeyBasedBatchContainer {
    pub fn bind(config: &PublisherConfig) -> Self {
        Self {
            state: BatchState::bind(config),
            groups: Vec::new(),
        }
    }

    /// The number of distinct keys currently held.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    fn group_mut(&mut self, key: Option<&str>) -> &mut Vec<PendingMessage> {
        let position = self
            .groups
            .iter()
            .position(|(group_key, _)| group_key.as_deref() == key);

        let index = match position {
            Some(index) => index,
            None => {
                self.groups.push((key.map(str::to_owned), Vec::new()));
                self.groups.len() - 1
            }
        };

        &mut self.groups[index].1
    }
}

impl BatchContainer for KeyBasedBatchContainer {
    fn has_room(&self, message: &PendingMessage) -> bool {
        self.state.has_room(message.size())
    }

    fn add(&mut self, message: PendingMessage) -> Result<()> {
        self.state.admit(&message)?;

        trace!(
            sequence_id = message.sequence_id(),
            key = ?message.key(),
            size = message.size(),
            "admitted keyed message"
        );

        let key = message.key().map(str::to_owned);
        self.group_mut(key.as_deref()).push(message);

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
        BatchVariant::Multi
    }

    fn builder(&mut self) -> BatchBuilder<'_> {
        BatchBuilder::Multi(self)
    }
}

impl MultiBatch for KeyBasedBatchContainer {
    fn build_send_batches(&mut self) -> Result<Vec<OpSendMsg>> {
        let groups = std::mem::take(&mut self.groups);
        self.state.reset();

        let ops = groups
            .into_iter()
            .map(|(key, messages)| self.state.encode(&messages, key))
            .collect::<Result<Vec<_>>>()?;

        self.state.record_flush(&ops);

        Ok(ops)
    }
}
