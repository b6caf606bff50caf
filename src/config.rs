//! Store connection configuration.
//!
//! Connection parameters for the backing object store, loadable from a
//! TOML file or built in code. Field defaults follow serde's
//! `#[serde(default)]` pattern so partial config files stay valid.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_db_path() -> PathBuf {
    PathBuf::from(".flatfs/store")
}

fn default_pool() -> String {
    "data".to_string()
}

/// Connection parameters for the backing object store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Filesystem location of the backing database.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Named pool (tree) within the database holding all objects.
    #[serde(default = "default_pool")]
    pub pool: String,

    /// Open a throwaway store that is discarded on drop. Test/reset usage.
    #[serde(default)]
    pub temporary: bool,
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| {
            StoreError::IllegalArgument(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// A throwaway store for tests; backed by a temp location sled cleans
    /// up on drop.
    pub fn ephemeral() -> Self {
        StoreConfig {
            temporary: true,
            ..StoreConfig::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: default_db_path(),
            pool: default_pool(),
            temporary: false,
        }
    }
}
