//! Sled-backed object store.
//!
//! One sled tree acts as the flat pool: keys are the object keys, values
//! the whole object payloads. Offset reads and writes are expressed over
//! whole-value get/insert, which matches the whole-object semantics the
//! mapping layer is written against.

use super::{ObjectInfo, ObjectStore};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use tracing::debug;

/// Connection-scoped handle to one sled tree used as the object pool.
#[derive(Debug)]
pub struct SledObjectStore {
    // Held so the database outlives the tree handle.
    _db: sled::Db,
    tree: sled::Tree,
}

impl SledObjectStore {
    /// Open the backing database and pool named by `config`.
    ///
    /// A failure here is a hard `Connection` error; no retry loop is
    /// owned by this layer.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        let sled_config = if config.temporary {
            sled::Config::new().temporary(true)
        } else {
            sled::Config::new().path(&config.path)
        };
        let db = sled_config.open().map_err(|e| {
            StoreError::Connection(format!(
                "cannot open store at {}: {}",
                config.path.display(),
                e
            ))
        })?;
        let tree = db.open_tree(config.pool.as_bytes()).map_err(|e| {
            StoreError::Connection(format!("cannot open pool {}: {}", config.pool, e))
        })?;
        debug!(path = %config.path.display(), pool = %config.pool, "connected to object store");
        Ok(SledObjectStore { _db: db, tree })
    }
}

impl ObjectStore for SledObjectStore {
    fn stat(&self, key: &str) -> Result<Option<ObjectInfo>> {
        let value = self.tree.get(key)?;
        Ok(value.map(|v| ObjectInfo {
            key: key.to_string(),
            size: v.len() as u64,
        }))
    }

    fn read(&self, key: &str, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let value = self
            .tree
            .get(key)?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let len = value.len() as u64;
        if offset >= len {
            return Ok(0);
        }
        let start = offset as usize;
        let n = buf.len().min(value.len() - start);
        buf[..n].copy_from_slice(&value[start..start + n]);
        Ok(n)
    }

    fn write(&self, key: &str, buf: &[u8], offset: u64) -> Result<()> {
        let existing = self.tree.get(key)?;
        let start = offset as usize;
        let needed = start + buf.len();
        let mut value = match existing {
            Some(v) => v.to_vec(),
            None => Vec::with_capacity(needed),
        };
        if value.len() < needed {
            value.resize(needed, 0);
        }
        value[start..needed].copy_from_slice(buf);
        self.tree.insert(key, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.tree.remove(key)?;
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in self.tree.iter().keys() {
            let raw = entry?;
            let key = String::from_utf8(raw.to_vec())
                .map_err(|_| StoreError::Decode("store key is not valid utf-8".into()))?;
            keys.push(key);
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ephemeral() -> SledObjectStore {
        SledObjectStore::connect(&StoreConfig::ephemeral()).unwrap()
    }

    #[test]
    fn connect_failure_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-db");
        std::fs::write(&blocker, "plain file").unwrap();
        let config = StoreConfig {
            path: blocker,
            ..StoreConfig::default()
        };
        let err = SledObjectStore::connect(&config).unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
    }

    #[test]
    fn stat_reports_size_or_absence() {
        let store = ephemeral();
        assert!(store.stat("k").unwrap().is_none());
        store.write("k", b"hello", 0).unwrap();
        assert_eq!(store.stat("k").unwrap().unwrap().size, 5);
    }

    #[test]
    fn read_is_bounded_by_object_end() {
        let store = ephemeral();
        store.write("k", b"hello", 0).unwrap();
        let mut buf = [0u8; 16];
        assert_eq!(store.read("k", 0, &mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], b"hello");
        assert_eq!(store.read("k", 3, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"lo");
        assert_eq!(store.read("k", 5, &mut buf).unwrap(), 0);
    }

    #[test]
    fn read_of_absent_key_is_not_found() {
        let store = ephemeral();
        let mut buf = [0u8; 4];
        let err = store.read("missing", 0, &mut buf).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn write_at_offset_grows_with_zero_fill() {
        let store = ephemeral();
        store.write("k", b"ab", 4).unwrap();
        let mut buf = [0u8; 6];
        assert_eq!(store.read("k", 0, &mut buf).unwrap(), 6);
        assert_eq!(&buf, b"\0\0\0\0ab");
    }

    #[test]
    fn overwrite_within_existing_object() {
        let store = ephemeral();
        store.write("k", b"hello world", 0).unwrap();
        store.write("k", b"HELLO", 0).unwrap();
        let mut buf = [0u8; 11];
        assert_eq!(store.read("k", 0, &mut buf).unwrap(), 11);
        assert_eq!(&buf, b"HELLO world");
    }

    #[test]
    fn remove_is_idempotent() {
        let store = ephemeral();
        store.write("k", b"x", 0).unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.stat("k").unwrap().is_none());
    }

    #[test]
    fn list_keys_covers_the_whole_pool() {
        let store = ephemeral();
        store.write("/a", b"1", 0).unwrap();
        store.write("block_7", b"2", 0).unwrap();
        let mut keys = store.list_keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["/a".to_string(), "block_7".to_string()]);
    }
}
