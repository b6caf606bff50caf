//! Tooling layer.
//!
//! Command-line maintenance tools over the filesystem store: listing,
//! stat, namespace dump and pool purge.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
