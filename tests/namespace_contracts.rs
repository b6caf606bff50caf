//! Namespace-level contracts: node round-trips, root auto-vivification,
//! prefix listing and non-cascading deletion.

use flatfs::config::StoreConfig;
use flatfs::fs::FileSystemStore;
use flatfs::inode::{Block, FileType, INode};
use flatfs::path::NodePath;

fn temp_fs() -> FileSystemStore {
    FileSystemStore::connect(&StoreConfig::ephemeral()).unwrap()
}

fn path(s: &str) -> NodePath {
    NodePath::new(s).unwrap()
}

#[test]
fn store_then_retrieve_returns_equal_record() {
    let fs = temp_fs();
    let dir = INode::directory();
    fs.store_inode(&path("/a"), &dir).unwrap();
    assert_eq!(fs.retrieve_inode(&path("/a")).unwrap(), dir);

    let file = INode::file(vec![Block::new(-7, 12), Block::new(9000, 4096)]);
    fs.store_inode(&path("/a/f"), &file).unwrap();
    assert_eq!(fs.retrieve_inode(&path("/a/f")).unwrap(), file);
}

#[test]
fn retrieve_of_absent_non_root_is_not_found() {
    let fs = temp_fs();
    let err = fs.retrieve_inode(&path("/nope")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn root_is_auto_created_on_first_touch() {
    let fs = temp_fs();
    // A freshly empty store still has a root.
    assert!(fs.path_exists(&NodePath::root()).unwrap());
    let root = fs.retrieve_inode(&NodePath::root()).unwrap();
    assert_eq!(root.file_type, FileType::Directory);

    // The synthesized record was persisted, not just returned.
    let keys = fs.object_store().list_keys().unwrap();
    assert_eq!(keys, vec!["/".to_string()]);
}

#[test]
fn root_retrieval_never_fails_and_persists_once() {
    let fs = temp_fs();
    fs.retrieve_inode(&NodePath::root()).unwrap();
    fs.retrieve_inode(&NodePath::root()).unwrap();
    assert!(fs.path_exists(&NodePath::root()).unwrap());
    let report = fs.dump().unwrap();
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].path, NodePath::root());
}

#[test]
fn overwrite_is_last_writer_wins() {
    let fs = temp_fs();
    fs.store_inode(&path("/p"), &INode::directory()).unwrap();
    let file = INode::file(vec![Block::new(1, 1)]);
    fs.store_inode(&path("/p"), &file).unwrap();
    assert_eq!(fs.retrieve_inode(&path("/p")).unwrap(), file);
}

#[test]
fn shorter_record_fully_replaces_longer_one() {
    let fs = temp_fs();
    let long = INode::file(vec![Block::new(1, 1), Block::new(2, 2), Block::new(3, 3)]);
    fs.store_inode(&path("/p"), &long).unwrap();
    let short = INode::directory();
    fs.store_inode(&path("/p"), &short).unwrap();
    // Would fail with a decode error if the old record's tail survived.
    assert_eq!(fs.retrieve_inode(&path("/p")).unwrap(), short);
}

#[test]
fn list_sub_paths_excludes_self_and_non_descendants() {
    let fs = temp_fs();
    for p in ["/a", "/a/b", "/a/b/c", "/ab", "/z"] {
        fs.store_inode(&path(p), &INode::directory()).unwrap();
    }
    let subs = fs.list_sub_paths(&path("/a")).unwrap();
    let keys: Vec<&str> = subs.iter().map(|p| p.as_key()).collect();
    // Transitive descendants included, `/a` itself and `/ab` excluded,
    // natural path ordering.
    assert_eq!(keys, vec!["/a/b", "/a/b/c"]);
}

#[test]
fn list_sub_paths_of_root_covers_everything_but_root() {
    let fs = temp_fs();
    assert!(fs.path_exists(&NodePath::root()).unwrap());
    for p in ["/a", "/b/c"] {
        fs.store_inode(&path(p), &INode::directory()).unwrap();
    }
    let subs = fs.list_sub_paths(&NodePath::root()).unwrap();
    let keys: Vec<&str> = subs.iter().map(|p| p.as_key()).collect();
    assert_eq!(keys, vec!["/a", "/b/c"]);
}

#[test]
fn list_sub_paths_ignores_block_objects() {
    let fs = temp_fs();
    let mut payload: &[u8] = b"data";
    let block = fs.allocate_and_store_block(&mut payload, 4).unwrap();
    fs.store_inode(&path("/f"), &INode::file(vec![block])).unwrap();
    let subs = fs.list_sub_paths(&NodePath::root()).unwrap();
    let keys: Vec<&str> = subs.iter().map(|p| p.as_key()).collect();
    assert_eq!(keys, vec!["/f"]);
}

#[test]
fn deleting_a_node_does_not_cascade_to_its_blocks() {
    let fs = temp_fs();
    let mut payload: &[u8] = b"some file content";
    let block = fs.allocate_and_store_block(&mut payload, 17).unwrap();
    fs.store_inode(&path("/a/f"), &INode::file(vec![block]))
        .unwrap();

    fs.delete_inode(&path("/a/f")).unwrap();
    assert!(!fs.path_exists(&path("/a/f")).unwrap());
    // The payload is still there until the caller deletes it.
    assert!(fs.block_exists(block.id).unwrap());
    assert_eq!(fs.retrieve_block(&block, 0).unwrap(), b"some file content");

    fs.delete_block(&block).unwrap();
    assert!(!fs.block_exists(block.id).unwrap());
}

#[test]
fn delete_inode_is_idempotent() {
    let fs = temp_fs();
    fs.store_inode(&path("/x"), &INode::directory()).unwrap();
    fs.delete_inode(&path("/x")).unwrap();
    fs.delete_inode(&path("/x")).unwrap();
    assert!(!fs.path_exists(&path("/x")).unwrap());
}

#[test]
fn foreign_bytes_fail_retrieval_with_a_decode_error() {
    let fs = temp_fs();
    fs.object_store()
        .write("/garbled", b"not a node record", 0)
        .unwrap();
    let err = fs.retrieve_inode(&path("/garbled")).unwrap_err();
    assert!(matches!(err, flatfs::error::StoreError::Decode(_)));
}

#[test]
fn relative_paths_are_rejected_before_io() {
    let err = NodePath::new("not/absolute").unwrap_err();
    assert!(matches!(
        err,
        flatfs::error::StoreError::IllegalArgument(_)
    ));
}

#[test]
fn store_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        path: dir.path().join("store"),
        ..StoreConfig::default()
    };
    let file = INode::file(vec![Block::new(5, 10)]);
    {
        let fs = FileSystemStore::connect(&config).unwrap();
        fs.store_inode(&path("/persisted"), &file).unwrap();
    }
    let fs = FileSystemStore::connect(&config).unwrap();
    assert_eq!(fs.retrieve_inode(&path("/persisted")).unwrap(), file);
}
