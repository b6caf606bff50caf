//! Human-readable namespace dump report.

use crate::inode::{Block, FileType};
use crate::path::NodePath;
use serde::Serialize;
use std::fmt;

/// One node record in a dump report.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceEntry {
    pub path: NodePath,
    pub file_type: FileType,
    pub blocks: Vec<Block>,
}

/// Full namespace walk: every node record, ordered by path.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceReport {
    pub entries: Vec<NamespaceEntry>,
}

impl NamespaceReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for NamespaceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filesystem:")?;
        for entry in &self.entries {
            writeln!(f, "{}:\t{}", entry.path, entry.file_type)?;
            if entry.file_type == FileType::Directory {
                continue;
            }
            for block in &entry.blocks {
                writeln!(f, "\tBlockId: {} Length: {}", block.id, block.len)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_renders_paths_types_and_blocks() {
        let report = NamespaceReport {
            entries: vec![
                NamespaceEntry {
                    path: NodePath::root(),
                    file_type: FileType::Directory,
                    blocks: Vec::new(),
                },
                NamespaceEntry {
                    path: NodePath::new("/a/f").unwrap(),
                    file_type: FileType::File,
                    blocks: vec![Block::new(99, 19)],
                },
            ],
        };
        let text = report.to_string();
        assert!(text.contains("/:\tDIRECTORY"));
        assert!(text.contains("/a/f:\tFILE"));
        assert!(text.contains("BlockId: 99 Length: 19"));
    }
}
