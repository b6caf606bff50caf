//! Namespace node model: node records and block references.
//!
//! Pure data plus (de)serialization; no store I/O lives here. A node
//! record is either a directory marker or a file descriptor carrying an
//! ordered block list. The serialized form opens with a format name and
//! version header so decoding can fail closed on foreign or truncated
//! bytes.

use crate::error::StoreError;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Format header written ahead of every serialized node record.
pub const FORMAT_NAME: &str = "fs-version";
/// Current format version value.
pub const FORMAT_VERSION: &str = "1";

const TAG_DIRECTORY: u8 = 1;
const TAG_FILE: u8 = 2;

/// Node type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Directory,
    File,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Directory => f.write_str("DIRECTORY"),
            FileType::File => f.write_str("FILE"),
        }
    }
}

/// Reference to one opaque chunk of file content, stored as a distinct
/// object under the block key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Randomly allocated 64-bit identifier, collision-free at allocation.
    pub id: BlockId,
    /// Byte length of the block's payload.
    pub len: u64,
}

impl Block {
    pub fn new(id: BlockId, len: u64) -> Self {
        Block { id, len }
    }

    /// Store key for this block's payload object.
    pub fn key(&self) -> String {
        crate::types::block_key(self.id)
    }
}

/// One namespace entry: a directory marker or a file descriptor with its
/// ordered block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct INode {
    pub file_type: FileType,
    pub blocks: Vec<Block>,
}

impl INode {
    /// A directory marker. Directories never carry blocks.
    pub fn directory() -> Self {
        INode {
            file_type: FileType::Directory,
            blocks: Vec::new(),
        }
    }

    /// A file descriptor. The block list may be empty for a zero-length
    /// file.
    pub fn file(blocks: Vec<Block>) -> Self {
        INode {
            file_type: FileType::File,
            blocks,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Total content length across all blocks.
    pub fn content_len(&self) -> u64 {
        self.blocks.iter().map(|b| b.len).sum()
    }

    /// Encode to the wire layout: header, file-type tag, block count,
    /// then per-block id and length, all big-endian.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        write_str(&mut out, FORMAT_NAME);
        write_str(&mut out, FORMAT_VERSION);
        let tag = match self.file_type {
            FileType::Directory => TAG_DIRECTORY,
            FileType::File => TAG_FILE,
        };
        out.push(tag);
        out.extend_from_slice(&(self.blocks.len() as u32).to_be_bytes());
        for block in &self.blocks {
            out.extend_from_slice(&block.id.to_be_bytes());
            out.extend_from_slice(&block.len.to_be_bytes());
        }
        out
    }

    /// Exact byte length of the serialized form.
    pub fn serialized_len(&self) -> usize {
        2 + FORMAT_NAME.len() + 2 + FORMAT_VERSION.len() + 1 + 4 + 16 * self.blocks.len()
    }

    /// Decode from the wire layout, validating the format header strictly.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, StoreError> {
        let mut cur = Cursor::new(bytes);
        let name = cur.read_str()?;
        if name != FORMAT_NAME {
            return Err(StoreError::Decode(format!(
                "unrecognized format name: {:?}",
                name
            )));
        }
        let version = cur.read_str()?;
        if version != FORMAT_VERSION {
            return Err(StoreError::Decode(format!(
                "unsupported format version: {:?}",
                version
            )));
        }
        let file_type = match cur.read_u8()? {
            TAG_DIRECTORY => FileType::Directory,
            TAG_FILE => FileType::File,
            other => {
                return Err(StoreError::Decode(format!(
                    "unknown file type tag: {}",
                    other
                )))
            }
        };
        let count = cur.read_u32()? as usize;
        let mut blocks = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let id = cur.read_i64()?;
            let len = cur.read_u64()?;
            blocks.push(Block::new(id, len));
        }
        if !cur.is_empty() {
            return Err(StoreError::Decode("trailing bytes after block list".into()));
        }
        Ok(INode { file_type, blocks })
    }
}

fn write_str(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u16).to_be_bytes());
    out.extend_from_slice(s.as_bytes());
}

/// Bounds-checked big-endian reader over the serialized record.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], StoreError> {
        let end = self.pos.checked_add(n).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                let out = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(out)
            }
            None => Err(StoreError::Decode("record truncated".into())),
        }
    }

    fn is_empty(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn read_u8(&mut self) -> Result<u8, StoreError> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, StoreError> {
        Ok(u16::from_be_bytes(self.take(2)?.try_into().unwrap()))
    }

    fn read_u32(&mut self) -> Result<u32, StoreError> {
        Ok(u32::from_be_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn read_i64(&mut self) -> Result<i64, StoreError> {
        Ok(i64::from_be_bytes(self.take(8)?.try_into().unwrap()))
    }

    fn read_u64(&mut self) -> Result<u64, StoreError> {
        Ok(u64::from_be_bytes(self.take(8)?.try_into().unwrap()))
    }

    fn read_str(&mut self) -> Result<&'a str, StoreError> {
        let len = self.read_u16()? as usize;
        let raw = self.take(len)?;
        std::str::from_utf8(raw)
            .map_err(|_| StoreError::Decode("header string is not valid utf-8".into()))
    }
}
