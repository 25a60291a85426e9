use std::fmt::Display;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T, E = TesseraError> = std::result::Result<T, E>;

/// The flavour of batch build that was requested from a batch container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchVariant {
    /// A build producing exactly one send unit.
    Single,
    /// A build producing a sequence of send units.
    Multi,
}

impl Display for BatchVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single-unit"),
            Self::Multi => write!(f, "multi-unit"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Payload size ({0} bytes) is greater than maximum allowed size ({1} bytes).")]
    PayloadTooLarge(u64, u64),

    #[error("Unknown message type: {0}")]
    UnknownMessageType(u8),

    #[error("Unknown compression type: {0}")]
    UnknownCompression(u8),

    #[error("Failed to serialize/deserialize message on protocol.")]
    SerdeError(#[source] bincode::Error),

    #[error("Malformed batch payload: {0}")]
    MalformedBatch(&'static str),
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to compress payload.")]
    CompressFailure(#[source] anyhow::Error),

    #[error("Failed to decompress payload.")]
    DecompressFailure(#[source] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("The batch container does not support {0} batch builds.")]
    Unsupported(BatchVariant),

    #[error(
        "Message of {size} bytes cannot be admitted into a batch holding {num_messages} messages and {current_size} bytes."
    )]
    AdmissionRejected {
        size: u64,
        current_size: u64,
        num_messages: u32,
    },

    #[error("Cannot build a send unit from an empty batch.")]
    EmptyBatch,

    #[error("No chunks found for sequence {0}.")]
    ChunkNotFound(Uuid),

    #[error("Sequence {id} is incomplete: received {received} of {expected} chunks.")]
    MissingChunks {
        id: Uuid,
        received: u32,
        expected: u32,
    },
}

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Counter value for key `{0}` is not an 8 byte integer.")]
    MalformedCounter(String),
}

#[derive(Error, Debug)]
pub enum TesseraError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("The transport rejected a frame.")]
    Transport(#[source] anyhow::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
