//! Core types and key-space constants for the flat-store namespace mapping.

/// BlockId: randomly allocated 64-bit identifier for a content block.
///
/// Ids are drawn from the full signed range, so their decimal key form may
/// carry a leading minus sign (e.g. `block_-4521002938`).
pub type BlockId = i64;

/// Key prefix distinguishing block objects from node records in the flat
/// key space. Node record keys always start with the path separator, so
/// the two families can never collide.
pub const BLOCK_PREFIX: &str = "block_";

/// Canonical path separator for namespace keys.
pub const PATH_SEPARATOR: char = '/';

/// Store key for a block id.
pub fn block_key(id: BlockId) -> String {
    format!("{}{}", BLOCK_PREFIX, id)
}

/// Whether a store key addresses a block object rather than a node record.
pub fn is_block_key(key: &str) -> bool {
    key.starts_with(BLOCK_PREFIX)
}
