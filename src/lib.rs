//! flatfs: Hierarchical Namespace over a Flat Object Store
//!
//! Maps a POSIX-like namespace of directories, files and file content
//! onto a flat, key-addressed object store offering only
//! get/put/stat/remove/list primitives. File content is split into
//! content blocks addressed by collision-free random 64-bit ids; node
//! records encode each path entry as a directory marker or a file
//! descriptor with its block list.

pub mod config;
pub mod error;
pub mod fs;
pub mod inode;
pub mod logging;
pub mod object;
pub mod path;
pub mod stream;
pub mod tooling;
pub mod types;
