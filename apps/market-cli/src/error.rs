//! # CLI Error Type
//!
//! Unified error type for the `market` binary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  MarketError (core) ───────┐                                           │
//! │  std::io::Error ───────────┤                                           │
//! │  toml::de::Error ──────────┼──► CliError ──► main() ──► error! + exit 1│
//! │  serde_json::Error ────────┤                                           │
//! │  invalid config ───────────┘                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use market_core::MarketError;
use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// Domain failure from market-core.
    #[error(transparent)]
    Market(#[from] MarketError),

    /// Config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`MarketConfig`](crate::config::MarketConfig).
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing command output failed.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Lookup failures (unknown order, unknown or sold-out item) exit with
    /// 2 so scripts can tell them apart from setup failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Market(err) if err.is_not_found() => 2,
            _ => 1,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
