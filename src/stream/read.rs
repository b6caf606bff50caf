//! Read-side positional adapter.

use crate::error::{Result, StoreError};
use crate::object::ObjectStore;
use std::sync::Arc;

/// Sequential reader over one store object.
///
/// The object's size is stat'd lazily on first use and cached for the
/// adapter's lifetime, so growth of the underlying object after the
/// adapter is opened is never observed. Callers that interleave
/// `read_into` with their own offset bookkeeping own the correctness of
/// the offsets they pass; the adapter only advances its cursor by the
/// bytes actually read.
pub struct ObjectReader {
    store: Arc<dyn ObjectStore>,
    key: String,
    pos: u64,
    size: Option<u64>,
    closed: bool,
}

impl ObjectReader {
    pub fn new(store: Arc<dyn ObjectStore>, key: impl Into<String>) -> Self {
        ObjectReader {
            store,
            key: key.into(),
            pos: 0,
            size: None,
            closed: false,
        }
    }

    /// Current cursor position.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Bytes remaining between the cursor and the object end, per the
    /// size cached on first call.
    pub fn available(&mut self) -> Result<u64> {
        let size = self.cached_size()?;
        Ok(size.saturating_sub(self.pos))
    }

    /// One bounded read at the caller-supplied object offset. Advances
    /// the cursor by the number of bytes actually read.
    pub fn read_into(&mut self, buf: &mut [u8], offset: u64, max_len: usize) -> Result<usize> {
        self.check_open()?;
        let want = max_len.min(buf.len());
        let n = self.store.read(&self.key, offset, &mut buf[..want])?;
        self.pos += n as u64;
        Ok(n)
    }

    /// Read the single byte at the cursor, or `None` at end of stream.
    pub fn read_one(&mut self) -> Result<Option<u8>> {
        self.check_open()?;
        let size = self.cached_size()?;
        if self.pos >= size {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        let n = self.store.read(&self.key, self.pos, &mut byte)?;
        if n == 0 {
            return Ok(None);
        }
        self.pos += 1;
        Ok(Some(byte[0]))
    }

    /// Marks are not supported.
    pub fn mark(&mut self) -> Result<()> {
        Err(StoreError::Unsupported("mark"))
    }

    /// Rewinding is not supported.
    pub fn rewind(&mut self) -> Result<()> {
        Err(StoreError::Unsupported("rewind"))
    }

    /// Idempotent; releases no store-side resource.
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn cached_size(&mut self) -> Result<u64> {
        if let Some(size) = self.size {
            return Ok(size);
        }
        let info = self
            .store
            .stat(&self.key)?
            .ok_or_else(|| StoreError::NotFound(self.key.clone()))?;
        self.size = Some(info.size);
        Ok(info.size)
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "stream closed",
            )));
        }
        Ok(())
    }
}
