//! flatfs CLI Binary
//!
//! Command-line interface for the flat-store namespace mapping layer.

use anyhow::Context;
use clap::Parser;
use flatfs::logging::{init_logging, LoggingConfig};
use flatfs::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut logging = LoggingConfig::default();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    init_logging(&logging).context("failed to initialize logging")?;

    let config = CliContext::resolve_config(cli.config.as_ref(), cli.db.as_ref())
        .context("failed to resolve store configuration")?;
    let context = CliContext::new(config).context("failed to connect to store")?;
    context.execute(&cli.command).map_err(Into::into)
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
