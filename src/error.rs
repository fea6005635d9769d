//! Error types for prefixset.

use thiserror::Error;

/// Error type for prefixset operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid binary file magic value
    #[error("invalid magic value: not a prefix set file")]
    InvalidMagic,

    /// Unsupported binary format version
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u32),

    /// File is smaller than the fixed header plus digest
    #[error("file truncated: need at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// File size does not match the counts declared in the header
    #[error("file size mismatch: header declares {expected} bytes, file has {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Stored digest does not match the recomputed digest
    #[error("digest mismatch")]
    ChecksumMismatch,

    /// Index offsets are out of range or not monotonic
    #[error("corrupt index: delta offsets out of range")]
    CorruptIndex,

    /// Vector length does not fit the 32-bit on-disk size field
    #[error("set too large to serialize: {len} entries exceed the 32-bit size field")]
    SetTooLarge { len: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for prefixset operations.
pub type Result<T> = std::result::Result<T, Error>;
