//! Wire-level types shared by the Tessera publisher and the consumers of its send units.
//!
//! A send unit is a [Frame] carrying [MessageMetadata] and a payload. Batch payloads are laid
//! out by [encode_batch_entry] and read back with [decode_batch], and [MessageCodec] writes
//! frames onto a byte transport.

mod batch;
mod chunk;
mod codec;
mod compression;
mod frame;
mod metadata;

pub use batch::*;
pub use chunk::*;
pub use codec::*;
pub use compression::*;
pub use frame::*;
pub use metadata::*;
