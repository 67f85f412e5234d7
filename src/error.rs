//! Error types for conversions and history persistence.

use crate::units::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving units or converting values.
///
/// All of these are recoverable: the caller reports them and returns to
/// its loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    /// Key is not registered in the unit table for this category
    #[error("Unknown unit '{unit}' for {category}")]
    UnknownUnit { category: Category, unit: String },

    /// Source or target choice is not acceptable for a conversion
    #[error("Invalid unit selection for {category}: {reason}")]
    InvalidUnitSelection { category: Category, reason: String },

    /// Value could not be read as a finite number
    #[error("Invalid input '{0}': please enter a number")]
    InvalidNumericInput(String),

    /// Result does not fit in a finite number
    #[error("{value} is too large to convert to {category} unit '{unit}'")]
    ResultOutOfRange {
        category: Category,
        unit: String,
        value: f64,
    },

    /// Category name not recognised
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// Errors raised by the history files.
///
/// `Read` and `Parse` are read failures, `Write`, `NonFinite`, `Serialize`
/// and `Remove`
/// are write failures.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to read history file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("History file {path:?} is corrupt: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write history file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Record from {timestamp} holds a non-finite value and cannot be written as JSON")]
    NonFinite { timestamp: String },

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to remove history file {path:?}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HistoryError {
    /// True for failures that happened while reading stored history
    pub fn is_read_failure(&self) -> bool {
        matches!(self, HistoryError::Read { .. } | HistoryError::Parse { .. })
    }
}
