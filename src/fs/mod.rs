//! Filesystem store: the façade translating namespace operations into
//! flat store key operations.
//!
//! Node records live under their canonical path string; block payloads
//! live under the block key prefix. The backing store has no native
//! hierarchy, so directory listing is a full key-space scan filtered by
//! string prefix. The store handle is an explicit value held by each
//! instance; there is no ambient connection state.

mod report;

pub use report::{NamespaceEntry, NamespaceReport};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::inode::{Block, INode};
use crate::object::{ObjectStore, SledObjectStore};
use crate::path::NodePath;
use crate::stream::{ObjectReader, ObjectWriter};
use crate::types::{is_block_key, BlockId};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Façade over one object store connection.
///
/// Safe to share across threads. The only concurrency guarantee offered
/// is that block-id allocation is mutually exclusive per instance;
/// everything else is last-write-wins over whatever atomicity the
/// backing store's single operations provide.
pub struct FileSystemStore {
    store: Arc<dyn ObjectStore>,
    alloc_lock: Mutex<()>,
}

impl FileSystemStore {
    /// Connect to the backing store named by `config`. Fails with a
    /// `Connection` error if the store cannot be opened; no retrying.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        let store = SledObjectStore::connect(config)?;
        Ok(Self::new(Arc::new(store)))
    }

    /// Wrap an already-connected store handle.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        FileSystemStore {
            store,
            alloc_lock: Mutex::new(()),
        }
    }

    /// The underlying connection handle, shared with stream adapters.
    pub fn object_store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }

    /// Whether a node record exists at `path`.
    ///
    /// Touching an absent root creates and persists a root directory
    /// record as a side effect: the namespace always has a root, lazily
    /// materialized on first touch.
    pub fn path_exists(&self, path: &NodePath) -> Result<bool> {
        if self.store.stat(path.as_key())?.is_some() {
            return Ok(true);
        }
        if path.is_root() {
            self.store_inode(path, &INode::directory())?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Fetch and decode the node record at `path`. Root is auto-created
    /// when absent; any other absent path is `NotFound`.
    pub fn retrieve_inode(&self, path: &NodePath) -> Result<INode> {
        let info = match self.store.stat(path.as_key())? {
            Some(info) => info,
            None if path.is_root() => {
                let root = INode::directory();
                self.store_inode(path, &root)?;
                return Ok(root);
            }
            None => return Err(StoreError::NotFound(path.as_key().to_string())),
        };
        let bytes = self.read_object(path.as_key(), 0, info.size)?;
        INode::deserialize(&bytes)
    }

    /// Serialize and put the record at `path`'s key, unconditionally
    /// replacing any existing record. Last writer wins.
    pub fn store_inode(&self, path: &NodePath, inode: &INode) -> Result<()> {
        debug!(path = %path, file_type = %inode.file_type, "store inode");
        self.put_object(path.as_key(), &inode.serialize())
    }

    /// Remove the node record at `path`. Does not cascade to any blocks
    /// the record referenced.
    pub fn delete_inode(&self, path: &NodePath) -> Result<()> {
        debug!(path = %path, "delete inode");
        self.store.remove(path.as_key())
    }

    /// Whether a block payload exists for `id`.
    pub fn block_exists(&self, id: BlockId) -> Result<bool> {
        Ok(self.store.stat(&crate::types::block_key(id))?.is_some())
    }

    /// Read a block payload from `from_offset` to the end.
    ///
    /// Fails with `NotFound` unless the stored size is strictly greater
    /// than `from_offset`. The read length is fixed from the advertised
    /// size at open time and not re-checked per chunk; a concurrent
    /// resize of the object can truncate or garble the result.
    pub fn retrieve_block(&self, block: &Block, from_offset: u64) -> Result<Vec<u8>> {
        let key = block.key();
        let size = match self.store.stat(&key)? {
            Some(info) if info.size > from_offset => info.size,
            _ => return Err(StoreError::NotFound(key)),
        };
        self.read_object(&key, from_offset, size - from_offset)
    }

    /// Write at most `len` bytes from `source` as the block's payload,
    /// one bounded transfer.
    pub fn store_block(&self, block: &Block, source: &mut dyn Read, len: u64) -> Result<()> {
        let mut payload = Vec::with_capacity(len.min(1 << 20) as usize);
        source.take(len).read_to_end(&mut payload)?;
        debug!(block = block.id, len = payload.len(), "store block");
        self.put_object(&block.key(), &payload)
    }

    /// Store a block payload from a local file.
    pub fn store_block_from_file(&self, block: &Block, file: &Path) -> Result<()> {
        let mut reader = std::fs::File::open(file)?;
        self.store_block(block, &mut reader, block.len)
    }

    /// Allocate a collision-free random block id, store `len` bytes from
    /// `source` under it, and return the populated block.
    ///
    /// The probe-then-store sequence runs under the instance's
    /// allocation lock so two concurrent allocations cannot claim the
    /// same id.
    pub fn allocate_and_store_block(&self, source: &mut dyn Read, len: u64) -> Result<Block> {
        let _guard = self.alloc_lock.lock();
        let mut id: BlockId = rand::random();
        while self.block_exists(id)? {
            id = rand::random();
        }
        let block = Block::new(id, len);
        self.store_block(&block, source, len)?;
        debug!(block = block.id, len = block.len, "allocated block");
        Ok(block)
    }

    /// Allocate and store a block whose payload and length come from a
    /// local file.
    pub fn allocate_and_store_block_from_file(&self, file: &Path) -> Result<Block> {
        let len = std::fs::metadata(file)?.len();
        let mut reader = std::fs::File::open(file)?;
        self.allocate_and_store_block(&mut reader, len)
    }

    /// Remove a block payload. Caller-driven; never invoked implicitly
    /// by node deletion.
    pub fn delete_block(&self, block: &Block) -> Result<()> {
        debug!(block = block.id, "delete block");
        self.store.remove(&block.key())
    }

    /// Every path whose key starts with `path`'s key plus the separator,
    /// excluding `path` itself, in natural path order.
    ///
    /// Always a full key-space scan: cost is linear in total object
    /// count. Immediate and transitive descendants are not distinguished.
    pub fn list_sub_paths(&self, path: &NodePath) -> Result<BTreeSet<NodePath>> {
        let prefix = path.descendant_prefix();
        let mut paths = BTreeSet::new();
        for key in self.store.list_keys()? {
            if key.starts_with(&prefix) {
                paths.insert(NodePath::from_key(&key));
            }
        }
        paths.remove(path);
        Ok(paths)
    }

    /// Destructive maintenance: best-effort removal of every object in
    /// the pool, nodes and blocks alike. Irreversible.
    pub fn purge(&self) -> Result<()> {
        let keys = self.store.list_keys()?;
        info!(objects = keys.len(), "purging store");
        for key in keys {
            if let Err(e) = self.store.remove(&key) {
                warn!(key = %key, error = %e, "purge: failed to remove object");
            }
        }
        Ok(())
    }

    /// Walk every node record in the pool and report path, type and
    /// block list. A single undecodable record aborts the whole dump.
    pub fn dump(&self) -> Result<NamespaceReport> {
        let mut nodes = BTreeMap::new();
        for key in self.store.list_keys()? {
            if is_block_key(&key) {
                continue;
            }
            let path = NodePath::from_key(&key);
            let inode = self.retrieve_inode(&path)?;
            nodes.insert(path, inode);
        }
        info!(entries = nodes.len(), "dumped namespace");
        Ok(NamespaceReport {
            entries: nodes
                .into_iter()
                .map(|(path, inode)| NamespaceEntry {
                    path,
                    file_type: inode.file_type,
                    blocks: inode.blocks,
                })
                .collect(),
        })
    }

    /// Replace the whole object at `key` with `bytes`.
    fn put_object(&self, key: &str, bytes: &[u8]) -> Result<()> {
        // Remove first: a positional write alone would leave the tail of
        // a longer previous object in place.
        self.store.remove(key)?;
        let mut writer = ObjectWriter::new(Arc::clone(&self.store), key);
        writer.write_span(bytes, 0, bytes.len())?;
        let result = writer.flush();
        writer.close();
        result
    }

    /// Read `len` bytes starting at `offset`, sized once up front.
    fn read_object(&self, key: &str, offset: u64, len: u64) -> Result<Vec<u8>> {
        let mut reader = ObjectReader::new(Arc::clone(&self.store), key);
        let mut buf = vec![0u8; len as usize];
        let mut filled = 0usize;
        while filled < buf.len() {
            let n = match reader.read_into(&mut buf[filled..], offset + filled as u64, len as usize - filled)
            {
                Ok(n) => n,
                Err(e) => {
                    reader.close();
                    return Err(e);
                }
            };
            if n == 0 {
                break;
            }
            filled += n;
        }
        reader.close();
        buf.truncate(filled);
        Ok(buf)
    }
}
