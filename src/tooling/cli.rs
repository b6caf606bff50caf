//! CLI Tooling
//!
//! Command-line maintenance interface for the flat-store namespace:
//! listing sub-paths, stat'ing node records, dumping the namespace and
//! purging the pool.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::fs::FileSystemStore;
use crate::inode::FileType;
use crate::path::NodePath;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// flatfs CLI - hierarchical namespace over a flat object store
#[derive(Parser)]
#[command(name = "flatfs")]
#[command(about = "Hierarchical namespace over a flat key-addressed object store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default store location)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backing database path (overrides config file)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all sub-paths under a namespace path
    Ls {
        /// Absolute namespace path
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the node record at a namespace path
    Stat {
        /// Absolute namespace path
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Dump every node record in the pool
    Dump {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Remove every object in the pool. Irreversible
    Purge {
        /// Skip confirmation; required for non-interactive use
        #[arg(long)]
        yes: bool,
    },
}

/// Execution context holding the connected filesystem store.
pub struct CliContext {
    fs: FileSystemStore,
}

impl CliContext {
    /// Connect to the store named by the resolved configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let fs = FileSystemStore::connect(&config)?;
        Ok(CliContext { fs })
    }

    /// Resolve configuration from an optional file plus overrides.
    pub fn resolve_config(
        config_file: Option<&PathBuf>,
        db_override: Option<&PathBuf>,
    ) -> Result<StoreConfig> {
        let mut config = match config_file {
            Some(path) => StoreConfig::load_from_file(path)?,
            None => StoreConfig::default(),
        };
        if let Some(db) = db_override {
            config.path = db.clone();
        }
        Ok(config)
    }

    /// Execute a command, returning its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String> {
        match command {
            Commands::Ls { path, format } => self.execute_ls(path, format),
            Commands::Stat { path, format } => self.execute_stat(path, format),
            Commands::Dump { format } => self.execute_dump(format),
            Commands::Purge { yes } => self.execute_purge(*yes),
        }
    }

    fn execute_ls(&self, path: &str, format: &str) -> Result<String> {
        check_format(format)?;
        let path = NodePath::new(path)?;
        let paths = self.fs.list_sub_paths(&path)?;
        if format == "json" {
            let arr: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
            return to_json(&json!({ "path": path.to_string(), "sub_paths": arr }));
        }
        let mut out = String::new();
        for p in &paths {
            out.push_str(p.as_key());
            out.push('\n');
        }
        Ok(out)
    }

    fn execute_stat(&self, path: &str, format: &str) -> Result<String> {
        check_format(format)?;
        let path = NodePath::new(path)?;
        let inode = self.fs.retrieve_inode(&path)?;
        if format == "json" {
            return to_json(&json!({
                "path": path.to_string(),
                "file_type": inode.file_type,
                "blocks": inode.blocks,
                "content_len": inode.content_len(),
            }));
        }
        let mut out = format!("{}:\t{}\n", path, inode.file_type);
        if inode.file_type == FileType::File {
            for block in &inode.blocks {
                out.push_str(&format!(
                    "\tBlockId: {} Length: {}\n",
                    block.id, block.len
                ));
            }
        }
        Ok(out)
    }

    fn execute_dump(&self, format: &str) -> Result<String> {
        check_format(format)?;
        let report = self.fs.dump()?;
        if format == "json" {
            return to_json(&report);
        }
        use comfy_table::Table;
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["Path", "Type", "Blocks", "Length"]);
        for entry in &report.entries {
            let blocks = if entry.file_type == FileType::Directory {
                "-".to_string()
            } else {
                entry
                    .blocks
                    .iter()
                    .map(|b| b.id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let length: u64 = entry.blocks.iter().map(|b| b.len).sum();
            table.add_row(vec![
                entry.path.to_string(),
                entry.file_type.to_string(),
                blocks,
                length.to_string(),
            ]);
        }
        Ok(table.to_string())
    }

    fn execute_purge(&self, yes: bool) -> Result<String> {
        if !yes {
            return Err(StoreError::IllegalArgument(
                "purge removes every object in the pool; pass --yes to confirm".to_string(),
            ));
        }
        self.fs.purge()?;
        info!("pool purged");
        Ok("purged".to_string())
    }
}

fn check_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(StoreError::IllegalArgument(format!(
            "unknown output format: {}",
            other
        ))),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::Decode(format!("json render failed: {}", e)))
}
