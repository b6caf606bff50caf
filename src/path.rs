//! Canonical namespace paths and their store-key encoding.
//!
//! A `NodePath` is the canonical absolute path of one namespace entry. Its
//! string form is used verbatim as the object-store key for the entry's
//! node record, so ordering over paths is plain string ordering and prefix
//! listing is a string-prefix scan.

use crate::error::StoreError;
use crate::types::PATH_SEPARATOR;
use serde::Serialize;
use std::fmt;

/// Canonical absolute path of a namespace entry.
///
/// Invariants: starts with the path separator; no trailing separator
/// except for the root itself. Construction goes through `new` so the
/// invariants hold everywhere a `NodePath` appears.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodePath(String);

impl NodePath {
    /// Parse a path string, rejecting non-absolute input before any I/O.
    pub fn new(path: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.starts_with(PATH_SEPARATOR) {
            return Err(StoreError::IllegalArgument(format!(
                "path must be absolute: {}",
                path
            )));
        }
        Ok(Self::canonicalize(path))
    }

    /// The namespace root, `/`.
    pub fn root() -> Self {
        NodePath(PATH_SEPARATOR.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// The store key for this path's node record: the path string itself.
    pub fn as_key(&self) -> &str {
        &self.0
    }

    /// Decode a store key back into a path. Keys written by this crate are
    /// always canonical, so this is infallible for our own key space.
    pub(crate) fn from_key(key: &str) -> Self {
        Self::canonicalize(key.to_string())
    }

    /// This path's key followed by the separator, the prefix every
    /// descendant key starts with.
    pub(crate) fn descendant_prefix(&self) -> String {
        if self.is_root() {
            self.0.clone()
        } else {
            format!("{}{}", self.0, PATH_SEPARATOR)
        }
    }

    fn canonicalize(mut path: String) -> Self {
        while path.len() > 1 && path.ends_with(PATH_SEPARATOR) {
            path.pop();
        }
        NodePath(path)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_paths() {
        let err = NodePath::new("a/b").unwrap_err();
        assert!(matches!(err, StoreError::IllegalArgument(_)));
    }

    #[test]
    fn root_is_root() {
        assert!(NodePath::root().is_root());
        assert!(NodePath::new("/").unwrap().is_root());
        assert!(!NodePath::new("/a").unwrap().is_root());
    }

    #[test]
    fn trailing_separators_are_stripped() {
        assert_eq!(NodePath::new("/a/b/").unwrap().as_key(), "/a/b");
        assert_eq!(NodePath::new("/").unwrap().as_key(), "/");
    }

    #[test]
    fn descendant_prefix_appends_separator_once() {
        assert_eq!(NodePath::new("/a").unwrap().descendant_prefix(), "/a/");
        assert_eq!(NodePath::root().descendant_prefix(), "/");
    }

    #[test]
    fn paths_order_by_string_form() {
        let mut paths = vec![
            NodePath::new("/b").unwrap(),
            NodePath::new("/a/z").unwrap(),
            NodePath::new("/a").unwrap(),
        ];
        paths.sort();
        let keys: Vec<&str> = paths.iter().map(|p| p.as_key()).collect();
        assert_eq!(keys, vec!["/a", "/a/z", "/b"]);
    }
}
