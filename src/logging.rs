//! Logging setup.
//!
//! Structured logging via the `tracing` crate. The filter comes from the
//! `FLATFS_LOG` environment variable when set, otherwise from the
//! configured level; output goes to stderr in text or JSON form.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: text or json.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Install the global subscriber. Call once, from the binary entrypoint.
pub fn init_logging(config: &LoggingConfig) -> Result<(), StoreError> {
    let filter = EnvFilter::try_from_env("FLATFS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.format.as_str() {
        "json" => builder.json().try_init(),
        "text" => builder.try_init(),
        other => {
            return Err(StoreError::IllegalArgument(format!(
                "unknown log format: {}",
                other
            )))
        }
    }
    .map_err(|e| StoreError::IllegalArgument(format!("logging init failed: {}", e)))
}
