/// The container format wrapped around a DEFLATE stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeflateLibrary {
    Gzip,
    /// The format used for batches tagged with the `zlib` wire compression type.
    #[default]
    Zlib,
}
