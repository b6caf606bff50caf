//! Write-side positional adapter.
//!
//! Writes land at the adapter's cursor and the cursor advances by
//! exactly the span written, so repeated calls append within the object.

use crate::error::{Result, StoreError};
use crate::object::ObjectStore;
use std::sync::Arc;

/// Sequential writer over one store object.
pub struct ObjectWriter {
    store: Arc<dyn ObjectStore>,
    key: String,
    pos: u64,
    closed: bool,
}

impl ObjectWriter {
    pub fn new(store: Arc<dyn ObjectStore>, key: impl Into<String>) -> Self {
        ObjectWriter {
            store,
            key: key.into(),
            pos: 0,
            closed: false,
        }
    }

    /// Current cursor position.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Write one byte at the cursor and advance by 1.
    pub fn write_one(&mut self, byte: u8) -> Result<()> {
        self.check_open()?;
        self.store.write(&self.key, &[byte], self.pos)?;
        self.pos += 1;
        Ok(())
    }

    /// Write `buf[offset..offset + len]` at the cursor and advance by
    /// `len`.
    pub fn write_span(&mut self, buf: &[u8], offset: usize, len: usize) -> Result<()> {
        self.check_open()?;
        let end = offset.checked_add(len).filter(|&e| e <= buf.len());
        let span = match end {
            Some(end) => &buf[offset..end],
            None => {
                return Err(StoreError::IllegalArgument(format!(
                    "span {}..{} out of bounds for buffer of {} bytes",
                    offset,
                    offset + len,
                    buf.len()
                )))
            }
        };
        self.store.write(&self.key, span, self.pos)?;
        self.pos += len as u64;
        Ok(())
    }

    /// No buffering happens at this layer; only the closed-state check.
    pub fn flush(&mut self) -> Result<()> {
        self.check_open()
    }

    /// Idempotent; releases no store-side resource.
    pub fn close(&mut self) {
        self.closed = true;
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
