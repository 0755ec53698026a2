//! # Market Configuration
//!
//! Configuration for the `market` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MARKET_LOG_FILTER=debug                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else $MARKET_CONFIG, else                         │
//! │     ~/.config/market/market.toml (Linux)                               │
//! │     ~/Library/Application Support/com.market.market/market.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     built-in catalog, default log filter                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # market.toml
//! log_filter = "info,market=debug"
//!
//! # Replaces the built-in catalog when present
//! [[catalog]]
//! id = 5
//! name = "Apple iPad Air"
//! category = "tablets"
//! price = 45990.0
//! stock = 7
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use market_core::{Catalog, CatalogEntry, MarketError};

use crate::error::{CliError, CliResult};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "MARKET_CONFIG";

/// Environment variable overriding `log_filter`.
pub const LOG_FILTER_ENV: &str = "MARKET_LOG_FILTER";

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,market=debug";

/// Where the config file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` or `$MARKET_CONFIG`: the file must exist.
    Required(PathBuf),
    /// Platform config dir: read if present.
    Optional(PathBuf),
    /// No config dir on this platform.
    Defaults,
}

impl ConfigSource {
    /// Picks the file: `--config`, else `$MARKET_CONFIG`, else `default_path`.
    pub fn resolve<F>(
        explicit_path: Option<PathBuf>,
        lookup: F,
        default_path: Option<PathBuf>,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit_path {
            return ConfigSource::Required(path);
        }

        if let Some(path) = lookup(CONFIG_PATH_ENV) {
            return ConfigSource::Required(PathBuf::from(path));
        }

        match default_path {
            Some(path) => ConfigSource::Optional(path),
            None => ConfigSource::Defaults,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// `tracing-subscriber` filter directive.
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Catalog seed rows. Empty means "use the built-in catalog".
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

impl MarketConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicitly requested file must exist; the platform default file
    /// is optional.
    pub fn load(explicit_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with(
            explicit_path,
            |key| std::env::var(key).ok(),
            Self::default_config_path(),
        )
    }

    /// [`MarketConfig::load`] with the environment and the platform
    /// default path supplied by the caller.
    pub fn load_with<F>(
        explicit_path: Option<PathBuf>,
        lookup: F,
        default_path: Option<PathBuf>,
    ) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match ConfigSource::resolve(explicit_path, &lookup, default_path) {
            ConfigSource::Required(path) => Self::from_file(&path)?,
            ConfigSource::Optional(path) if path.exists() => Self::from_file(&path)?,
            ConfigSource::Optional(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            ConfigSource::Defaults => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading market config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Platform config location, e.g. `~/.config/market/market.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "market", "market")
            .map(|dirs| dirs.config_dir().join("market.toml"))
    }

    /// Applies overrides from `lookup` (the process environment in
    /// [`MarketConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            debug!(filter = %filter, "Overriding log filter from environment");
            self.log_filter = Some(filter);
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(CliError::InvalidConfig(
                    "log_filter must not be empty".into(),
                ));
            }

            EnvFilter::try_new(filter).map_err(|err| {
                CliError::InvalidConfig(format!("log_filter '{filter}' is invalid: {err}"))
            })?;
        }

        Ok(())
    }

    /// Effective log filter.
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Builds the catalog: the configured rows if any, else the built-in one.
    pub fn build_catalog(&self) -> CliResult<Catalog> {
        if self.catalog.is_empty() {
            return Ok(Catalog::standard());
        }

        let catalog =
            Catalog::from_entries(self.catalog.iter().cloned()).map_err(MarketError::from)?;
        info!(items = catalog.len(), "Using catalog from config");
        Ok(catalog)
    }
}
