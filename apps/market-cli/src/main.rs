//! # Market Command-Line Entry Point
//!
//! A thin front end over `market-core`.
//!
//! ## Usage
//! ```bash
//! # Show the catalog with current stock
//! market catalog
//!
//! # Show promo codes
//! market promos
//!
//! # Place one order and print it as JSON
//! market order --client-id 1 --client-name Alice --item 7 --item 10 --promo happy-new-year
//!
//! # Use a custom catalog
//! market --config ./market.toml catalog
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing from `RUST_LOG` or the default filter (logs to stderr)
//! 3. Load configuration (defaults → file → environment)
//! 4. Swap in the configured log filter
//! 5. Build the catalog and the service
//! 6. Run the subcommand (output to stdout)

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

use market_core::{ClientId, ItemId, MarketService, PromoCode};

use crate::commands::OrderSession;
use crate::config::{MarketConfig, DEFAULT_LOG_FILTER};
use crate::error::CliResult;

#[derive(Debug, Parser)]
#[command(name = "market", version, about = "In-memory order management over a fixed catalog")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog items and stock
    Catalog,

    /// List promo codes and their discounts
    Promos,

    /// Create one order, add items, apply promo codes, print the result
    Order {
        #[arg(long)]
        client_id: ClientId,

        #[arg(long)]
        client_name: String,

        /// Catalog item id to add; repeat to add more units
        #[arg(long = "item")]
        items: Vec<ItemId>,

        /// Promo code to apply (only the first one takes effect)
        #[arg(long = "promo")]
        promos: Vec<PromoCode>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_filter = init_tracing();

    match run(cli, &log_filter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli, log_filter: &LogFilter) -> CliResult<()> {
    let config = MarketConfig::load(cli.config)?;
    log_filter.apply(config.log_filter());

    let catalog = config.build_catalog()?;
    let mut service = MarketService::with_catalog(catalog);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Catalog => commands::list_catalog(service.catalog(), &mut stdout),
        Command::Promos => commands::list_promos(&mut stdout),
        Command::Order {
            client_id,
            client_name,
            items,
            promos,
        } => {
            let session = OrderSession {
                client_id,
                client_name,
                items,
                promos,
            };
            let order_id = commands::run_order(&mut service, session, &mut stdout)?;
            info!(order_id, "Order session finished");
            Ok(())
        }
    }
}

/// Handle to the installed filter, so the configured one can replace the
/// bootstrap filter once the config is loaded.
struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    /// `RUST_LOG` was set and wins over the config.
    pinned: bool,
}

impl LogFilter {
    /// Replaces the active filter with `directives` unless `RUST_LOG` is set.
    fn apply(&self, directives: &str) {
        if self.pinned {
            debug!("RUST_LOG is set, keeping it over the configured filter");
            return;
        }

        let filter = match EnvFilter::try_new(directives) {
            Ok(filter) => filter,
            Err(err) => {
                warn!(filter = directives, error = %err, "Ignoring invalid log filter");
                return;
            }
        };

        if let Err(err) = self.handle.reload(filter) {
            warn!(error = %err, "Failed to apply log filter");
        }
    }
}

/// Filter used before the config is read: `RUST_LOG` if it parses, else
/// the default. The flag says whether `RUST_LOG` supplied it.
fn bootstrap_filter(rust_log: Option<&str>) -> (EnvFilter, bool) {
    match rust_log.map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, true),
        _ => (EnvFilter::new(DEFAULT_LOG_FILTER), false),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - wins over everything
/// - otherwise the config's `log_filter` (or `MARKET_LOG_FILTER`), applied
///   through [`LogFilter::apply`] after the config loads
/// - Default: `info,market=debug`
fn init_tracing() -> LogFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, pinned) = bootstrap_filter(rust_log.as_deref());
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    LogFilter { handle, pinned }
}
