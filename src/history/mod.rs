//! Conversion History
//!
//! Information Hiding:
//! - File names and on-disk formats hidden behind `HistoryStore`
//! - Fallback from the JSON file to the plain-text log handled internally
//! - Callers only see records, snapshots and append outcomes

mod json;
mod store;
mod text;

pub use store::HistoryStore;

use crate::error::HistoryError;
use crate::units::Category;
use serde::{Deserialize, Serialize};

/// Maximum number of records kept in the log
pub const HISTORY_CAPACITY: usize = 100;

pub const JSON_FILE_NAME: &str = "conversion_history.json";
pub const TEXT_FILE_NAME: &str = "conversion_history.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One successful conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(rename = "from")]
    pub from_symbol: String,
    #[serde(rename = "to")]
    pub to_symbol: String,
    #[serde(rename = "value")]
    pub input_value: f64,
    #[serde(rename = "result")]
    pub output_value: f64,
}

impl ConversionRecord {
    pub fn new(
        timestamp: impl Into<String>,
        category: Category,
        from_symbol: impl Into<String>,
        to_symbol: impl Into<String>,
        input_value: f64,
        output_value: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            category,
            from_symbol: from_symbol.into(),
            to_symbol: to_symbol.into(),
            input_value,
            output_value,
        }
    }

    /// Record stamped with the current local time, second precision
    pub fn now(
        category: Category,
        from_symbol: impl Into<String>,
        to_symbol: impl Into<String>,
        input_value: f64,
        output_value: f64,
    ) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::new(timestamp, category, from_symbol, to_symbol, input_value, output_value)
    }
}

/// Which file currently backs the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    /// Indented JSON array
    Structured,
    /// One plain-text line per record
    Degraded,
}

/// Point-in-time view of the log
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub format: StorageFormat,
    pub records: Vec<ConversionRecord>,
}

/// What happened to the durable copy of an appended record.
///
/// The in-memory log always keeps the record regardless of outcome.
#[derive(Debug)]
pub enum AppendOutcome {
    /// JSON file rewritten
    Stored,
    /// Record went to the plain-text log. `cause` is set when the JSON file
    /// failed during this append, `None` when the store was already degraded.
    Degraded { cause: Option<HistoryError> },
    /// Nothing was written
    Skipped {
        structured: Option<HistoryError>,
        fallback: HistoryError,
    },
}

impl AppendOutcome {
    pub fn is_persisted(&self) -> bool {
        !matches!(self, AppendOutcome::Skipped { .. })
    }
}
