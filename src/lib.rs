//! unitconv - unit conversion with a persistent history
//!
//! This library provides the unit tables, the conversion engine, the
//! bounded conversion history and its statistics. The `unitconv` binary
//! puts an interactive menu and a few subcommands on top.

mod config;
pub mod conversion;
pub mod error;
pub mod history;
pub mod stats;
pub mod units;
pub mod utils;

pub mod cli;

pub use crate::config::{ConversionConfig, HistoryConfig, LoggingConfig, Settings};
pub use conversion::{parse_value, Converter};
pub use error::{ConversionError, HistoryError};
pub use history::{AppendOutcome, ConversionRecord, HistorySnapshot, HistoryStore, StorageFormat};
pub use stats::{summarize, summarize_records, Statistics};
pub use units::{Category, TemperatureScale, UnitDefinition, UnitTable};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so they
/// never mix with menu output.
pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
