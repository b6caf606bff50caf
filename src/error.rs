//! Error taxonomy for the namespace mapping layer.
//!
//! Every backing-store fault is wrapped into one of these variants and
//! propagated to the immediate caller. There are no internal retries; the
//! only place a secondary error is swallowed is best-effort cleanup
//! (closing a partially-used stream, the purge sweep).

use thiserror::Error;

/// Errors surfaced by the filesystem store, stream adapters and node codec.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or opened at init time.
    /// Fatal; no retry loop is owned by this layer.
    #[error("store connection failed: {0}")]
    Connection(String),

    /// A key (node record or block) is absent from the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// Stored bytes failed node-record format validation.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A malformed argument was rejected before any I/O, e.g. a
    /// non-absolute path.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// The operation is not supported by this adapter (mark/rewind).
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// An I/O fault outside the backing store (local file transfer).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An unexpected fault raised by the backing store.
    #[error("store backend error: {0}")]
    Backend(#[from] sled::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Whether this error means "the key simply is not there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
