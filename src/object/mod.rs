//! Object store boundary.
//!
//! The narrow capability interface the namespace mapping layer consumes:
//! a flat, key-addressed pool supporting stat/read/write/remove/list only.
//! Everything above this trait is store-agnostic; the sled backend is the
//! one concrete implementation shipped here.

pub mod sled;

use crate::error::Result;

pub use self::sled::SledObjectStore;

/// Metadata for one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
}

/// Connection-scoped handle to the flat object store.
///
/// Implementations are shared read/write across every operation issued
/// through one filesystem store instance, so they must be internally
/// thread-safe. No retry or caching policy lives behind this trait; a
/// failed call surfaces immediately. There is no explicit disconnect:
/// dropping the last handle tears the connection down.
pub trait ObjectStore: Send + Sync {
    /// Object metadata, or `None` if the key is absent.
    fn stat(&self, key: &str) -> Result<Option<ObjectInfo>>;

    /// One bounded read starting at `offset`. Returns the number of bytes
    /// copied into `buf`, which is zero at or past the object's end.
    /// Fails with `NotFound` if the key is absent.
    fn read(&self, key: &str, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// One bounded write of `buf` starting at `offset`, creating the
    /// object if absent and growing it as needed.
    fn write(&self, key: &str, buf: &[u8], offset: u64) -> Result<()>;

    /// Remove the object. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently in the pool, in implementation order.
    fn list_keys(&self) -> Result<Vec<String>>;
}
