//! Re-exports commonly used types and traits.
//!
//! ```
//! use tessera::prelude::*;
//! ```

pub use crate::batching::{BatchContainer, Message, MultiBatch, SingleBatch};
pub use crate::config::{CompressionType, PublisherConfig};
pub use crate::state::{StateContext, Table};
pub use crate::Publisher;
