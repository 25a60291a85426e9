//! Key/value state and counters shared with the functions running alongside a publisher.
//!
//! A [Table] is the storage seam, keyed and valued by raw bytes. [StateContext] is the
//! string-keyed view handed to user code, and [TableStateContext] adapts any [Table] into one by
//! encoding keys as UTF-8. [MemoryTable] keeps everything in process.

mod context;
mod table;

pub use context::*;
pub use table::*;
